//! Analysis grid: the region tiled into fixed-size cells carrying terrain,
//! vegetation and risk state
//!
//! Cells are stored row-major in one `Vec` (`[row * cols + col]`), rows running
//! south to north and columns west to east. Each cell is anchored at its
//! southwest corner.

use crate::config::GridConfig;
use crate::core_types::geo::{GeoPoint, HeatmapPoint};
use crate::core_types::vegetation::VegetationCatalog;
use crate::error::{ensure_finite, ensure_positive, Error, Result};
use crate::grid::terrain::{TerrainProvider, TerrainSample, VegetationSample};
use crate::risk::vegetation::calculate_vegetation_risk;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Terrain, vegetation and derived vegetation risk for one cell.
/// Computed once when the grid is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalFactors {
    pub vegetation: VegetationSample,
    pub terrain: TerrainSample,
    /// 0-1
    pub vegetation_risk: f64,
}

/// One tile of the analysis region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    /// Southwest corner latitude
    pub lat: f64,
    /// Southwest corner longitude
    pub lng: f64,
    /// 0-1, recomputed whenever weather or historical inputs change
    pub risk_score: f64,
    /// Historical fire records located in this cell
    pub historical_fires: u32,
    pub environmental_factors: EnvironmentalFactors,
}

impl GridCell {
    /// Fresh cell with zero risk and no recorded fires
    pub fn new(lat: f64, lng: f64, environmental_factors: EnvironmentalFactors) -> Self {
        GridCell {
            lat,
            lng,
            risk_score: 0.0,
            historical_fires: 0,
            environmental_factors,
        }
    }

    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Rectangular grid of [`GridCell`]s
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskGrid {
    /// Southwest corner of cell (0, 0)
    pub(crate) origin: GeoPoint,
    /// Cell edge length in degrees
    pub(crate) cell_size: f64,
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) cells: Vec<GridCell>,
}

impl RiskGrid {
    /// Tile the configured bounds and attach terrain, vegetation and
    /// vegetation risk to every cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the grid configuration is invalid.
    pub fn build(
        config: &GridConfig,
        provider: &dyn TerrainProvider,
        catalog: &VegetationCatalog,
    ) -> Result<Self> {
        config.validate()?;
        let (rows, cols) = config.dimensions();
        let bounds = config.bounds;
        let cell_size = config.cell_size_deg;

        let cells: Vec<GridCell> = (0..rows * cols)
            .into_par_iter()
            .map(|idx| {
                let row = idx / cols;
                let col = idx % cols;
                let lat = bounds.south + row as f64 * cell_size;
                let lng = bounds.west + col as f64 * cell_size;

                let terrain = provider.terrain_at(lat, lng);
                let vegetation = provider.vegetation_at(lat, lng);
                let vegetation_risk = calculate_vegetation_risk(&vegetation, &terrain, catalog);

                GridCell::new(
                    lat,
                    lng,
                    EnvironmentalFactors {
                        vegetation,
                        terrain,
                        vegetation_risk,
                    },
                )
            })
            .collect();

        info!(rows, cols, cell_size, "Built analysis grid");

        Ok(RiskGrid {
            origin: GeoPoint::new(bounds.south, bounds.west),
            cell_size,
            rows,
            cols,
            cells,
        })
    }

    /// Assemble a grid from pre-built cells (row-major).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `cells.len() != rows * cols`, the
    /// cell size is not positive or the origin is not finite.
    pub fn from_cells(
        origin: GeoPoint,
        cell_size: f64,
        rows: usize,
        cols: usize,
        cells: Vec<GridCell>,
    ) -> Result<Self> {
        ensure_finite("origin.lat", origin.lat)?;
        ensure_finite("origin.lng", origin.lng)?;
        ensure_positive("cell_size", cell_size)?;
        if cells.len() != rows * cols {
            return Err(Error::InvalidParameter {
                name: "cells",
                message: format!(
                    "expected {rows}x{cols} = {} cells, got {}",
                    rows * cols,
                    cells.len()
                ),
            });
        }
        Ok(RiskGrid {
            origin,
            cell_size,
            rows,
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [GridCell] {
        &mut self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&GridCell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut GridCell> {
        if row < self.rows && col < self.cols {
            self.cells.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// Iterate rows south to north, each a west-to-east slice
    pub fn iter_rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(self.cols.max(1))
    }

    /// (row, col) of the cell whose tile contains the point, if inside the grid
    pub fn index_of(&self, lat: f64, lng: f64) -> Option<(usize, usize)> {
        let row = ((lat - self.origin.lat) / self.cell_size).floor();
        let col = ((lng - self.origin.lng) / self.cell_size).floor();
        if !row.is_finite() || !col.is_finite() || row < 0.0 || col < 0.0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    /// Cell whose tile contains the point
    pub fn cell_containing(&self, lat: f64, lng: f64) -> Option<&GridCell> {
        self.index_of(lat, lng).and_then(|(row, col)| self.get(row, col))
    }

    /// Copy into nested rows, the shape map layers consume
    pub fn to_rows(&self) -> Vec<Vec<GridCell>> {
        self.iter_rows().map(<[GridCell]>::to_vec).collect()
    }

    /// One heatmap sample per cell weighted by risk score
    pub fn heatmap(&self) -> Vec<HeatmapPoint> {
        self.cells
            .iter()
            .map(|cell| HeatmapPoint {
                lat: cell.lat,
                lng: cell.lng,
                weight: cell.risk_score,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoundingBox;
    use crate::grid::terrain::SyntheticTerrain;
    use std::collections::HashSet;

    fn pinelands_grid() -> RiskGrid {
        let config = GridConfig::default();
        let terrain = SyntheticTerrain::pinelands(config.terrain_seed);
        RiskGrid::build(&config, &terrain, &VegetationCatalog::pinelands()).unwrap()
    }

    #[test]
    fn test_grid_is_complete_tiling() {
        let grid = pinelands_grid();
        assert_eq!(grid.rows(), 120);
        assert_eq!(grid.cols(), 80);
        assert_eq!(grid.len(), 9600);

        let distinct: HashSet<(i64, i64)> = grid
            .cells()
            .iter()
            .map(|c| ((c.lat * 1e6).round() as i64, (c.lng * 1e6).round() as i64))
            .collect();
        assert_eq!(distinct.len(), 9600);
    }

    #[test]
    fn test_row_major_south_to_north_west_to_east() {
        let grid = pinelands_grid();
        let first = grid.get(0, 0).unwrap();
        assert!((first.lat - 39.2).abs() < 1e-9);
        assert!((first.lng + 75.0).abs() < 1e-9);

        let east = grid.get(0, 1).unwrap();
        assert!(east.lng > first.lng);
        let north = grid.get(1, 0).unwrap();
        assert!(north.lat > first.lat);

        let last = grid.get(119, 79).unwrap();
        assert!((last.lat - 40.39).abs() < 1e-9);
        assert!((last.lng + 74.21).abs() < 1e-9);
    }

    #[test]
    fn test_new_cells_start_clean() {
        let grid = pinelands_grid();
        for cell in grid.cells() {
            assert_eq!(cell.risk_score, 0.0);
            assert_eq!(cell.historical_fires, 0);
            let risk = cell.environmental_factors.vegetation_risk;
            assert!((0.0..=1.0).contains(&risk));
        }
    }

    #[test]
    fn test_cells_take_terrain_from_provider() {
        let config = GridConfig::default();
        let terrain = SyntheticTerrain::pinelands(config.terrain_seed);
        let grid = RiskGrid::build(&config, &terrain, &VegetationCatalog::pinelands()).unwrap();
        let cell = grid.get(10, 20).unwrap();
        assert_eq!(
            cell.environmental_factors.terrain,
            terrain.terrain_at(cell.lat, cell.lng)
        );
        assert_eq!(
            cell.environmental_factors.vegetation,
            terrain.vegetation_at(cell.lat, cell.lng)
        );
    }

    #[test]
    fn test_index_of() {
        let grid = pinelands_grid();
        assert_eq!(grid.index_of(39.2, -75.0), Some((0, 0)));
        assert_eq!(grid.index_of(39.2149, -74.9851), Some((1, 1)));
        assert_eq!(grid.index_of(39.19, -74.5), None);
        assert_eq!(grid.index_of(39.8, -75.0123), None);
        assert_eq!(grid.index_of(40.41, -74.5), None);
        assert_eq!(grid.index_of(f64::NAN, -74.5), None);
    }

    #[test]
    fn test_from_cells_validates_shape() {
        let factors = EnvironmentalFactors {
            vegetation: VegetationSample::default(),
            terrain: TerrainSample::default(),
            vegetation_risk: 0.5,
        };
        let cells = vec![GridCell::new(39.8, -74.5, factors)];
        assert!(RiskGrid::from_cells(GeoPoint::new(39.8, -74.5), 0.01, 1, 2, cells.clone()).is_err());
        assert!(RiskGrid::from_cells(GeoPoint::new(39.8, -74.5), 0.01, 1, 1, cells).is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GridConfig {
            bounds: BoundingBox {
                north: 39.0,
                ..BoundingBox::PINELANDS
            },
            ..Default::default()
        };
        let terrain = SyntheticTerrain::pinelands(1);
        assert!(RiskGrid::build(&config, &terrain, &VegetationCatalog::pinelands()).is_err());

        // Would need ~96 billion cells
        let oversized = GridConfig {
            cell_size_deg: 1e-7,
            ..Default::default()
        };
        let err = RiskGrid::build(&oversized, &terrain, &VegetationCatalog::pinelands()).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "cell_size_deg", .. }));
    }

    #[test]
    fn test_heatmap_and_rows_shape() {
        let grid = pinelands_grid();
        assert_eq!(grid.heatmap().len(), grid.len());
        let rows = grid.to_rows();
        assert_eq!(rows.len(), 120);
        assert!(rows.iter().all(|r| r.len() == 80));
    }
}
