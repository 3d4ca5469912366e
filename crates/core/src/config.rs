//! Configuration for grid construction, risk scoring and fire-spread simulation
//!
//! Every struct has a `Default` matching the Pinelands deployment, so callers
//! only override what they need:
//!
//! ```
//! use pinelands_risk_core::config::{GridConfig, SimulationConfig};
//!
//! let grid = GridConfig { terrain_seed: 7, ..Default::default() };
//! let sim = SimulationConfig { max_steps: 2_000, ..Default::default() };
//! assert!((grid.cell_size_deg - 0.01).abs() < 1e-12);
//! assert_eq!(sim.max_steps, 2_000);
//! ```

use crate::error::{ensure_finite, ensure_positive, Error, Result};
use serde::{Deserialize, Serialize};

/// Geographic bounding box in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// New Jersey Pinelands analysis region
    pub const PINELANDS: BoundingBox = BoundingBox {
        north: 40.4,
        south: 39.2,
        east: -74.2,
        west: -75.0,
    };

    /// Latitude span in degrees
    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    /// Longitude span in degrees
    pub fn lng_span(&self) -> f64 {
        self.east - self.west
    }

    /// Center point (lat, lng)
    pub fn center(&self) -> (f64, f64) {
        (
            (self.north + self.south) / 2.0,
            (self.east + self.west) / 2.0,
        )
    }

    /// Check the box is finite with north > south and east > west
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for non-finite or inverted edges.
    pub fn validate(&self) -> Result<()> {
        ensure_finite("bounds.north", self.north)?;
        ensure_finite("bounds.south", self.south)?;
        ensure_finite("bounds.east", self.east)?;
        ensure_finite("bounds.west", self.west)?;
        if self.north <= self.south {
            return Err(Error::InvalidParameter {
                name: "bounds",
                message: format!("north ({}) must exceed south ({})", self.north, self.south),
            });
        }
        if self.east <= self.west {
            return Err(Error::InvalidParameter {
                name: "bounds",
                message: format!("east ({}) must exceed west ({})", self.east, self.west),
            });
        }
        Ok(())
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::PINELANDS
    }
}

/// Analysis grid layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Region to tile
    pub bounds: BoundingBox,
    /// Cell edge length in degrees (0.01° ≈ 1 km)
    pub cell_size_deg: f64,
    /// Seed for the synthetic terrain/vegetation table
    pub terrain_seed: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            bounds: BoundingBox::PINELANDS,
            cell_size_deg: 0.01,
            terrain_seed: 0x5049_4E45, // "PINE"
        }
    }
}

impl GridConfig {
    /// Largest grid, in cells, that `validate` accepts
    pub const MAX_CELLS: usize = 4_000_000;

    /// Number of (rows, cols) needed to tile the bounds with no gaps
    pub fn dimensions(&self) -> (usize, usize) {
        (
            cells_to_cover(self.bounds.lat_span(), self.cell_size_deg),
            cells_to_cover(self.bounds.lng_span(), self.cell_size_deg),
        )
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for an invalid bounding box, a
    /// cell size that is not finite and positive, or a cell size so small the
    /// grid would exceed [`GridConfig::MAX_CELLS`].
    pub fn validate(&self) -> Result<()> {
        self.bounds.validate()?;
        ensure_positive("cell_size_deg", self.cell_size_deg)?;
        let (rows, cols) = self.dimensions();
        ensure_cell_count("cell_size_deg", rows, cols)?;
        Ok(())
    }
}

/// rows * cols, rejected on overflow or above [`GridConfig::MAX_CELLS`]
pub(crate) fn ensure_cell_count(name: &'static str, rows: usize, cols: usize) -> Result<usize> {
    match rows.checked_mul(cols) {
        Some(cells) if cells <= GridConfig::MAX_CELLS => Ok(cells),
        _ => Err(Error::InvalidParameter {
            name,
            message: format!(
                "{rows}x{cols} grid exceeds the {} cell limit",
                GridConfig::MAX_CELLS
            ),
        }),
    }
}

/// ceil(span / cell) with a small tolerance so 1.2 / 0.01 gives 120, not 121
pub(crate) fn cells_to_cover(span: f64, cell: f64) -> usize {
    const EPS: f64 = 1e-9;
    let exact = span / cell;
    (exact - EPS).ceil().max(0.0) as usize
}

/// Weights for the final per-cell risk score. The defaults sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskWeights {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub seasonality: f64,
    pub historical_density: f64,
    pub vegetation: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            temperature: 0.15,
            humidity: 0.20,
            wind_speed: 0.15,
            seasonality: 0.10,
            historical_density: 0.15,
            vegetation: 0.25,
        }
    }
}

impl RiskWeights {
    pub fn total(&self) -> f64 {
        self.temperature
            + self.humidity
            + self.wind_speed
            + self.seasonality
            + self.historical_density
            + self.vegetation
    }
}

/// Fire-spread model tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Nominal cell size in meters. Used as the run for terrain slope between
    /// cells and, scaled by 0.001, as the distance normalizer.
    pub cell_size_meters: f64,
    /// Downwind acceleration per mph of wind
    pub wind_speed_factor: f64,
    /// Spread multiplier per degree of slope between cells
    pub slope_factor: f64,
    /// Maximum lat/lng difference for the ignition point to match a cell
    pub ignition_tolerance_deg: f64,
    /// Upper bound on duration*60/time_step
    pub max_steps: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cell_size_meters: 100.0,
            wind_speed_factor: 0.2,
            slope_factor: 0.1,
            ignition_tolerance_deg: 0.001,
            max_steps: 10_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinelands_dimensions() {
        let config = GridConfig::default();
        assert_eq!(config.dimensions(), (120, 80));
    }

    #[test]
    fn test_cells_to_cover_partial_cell() {
        assert_eq!(cells_to_cover(0.025, 0.01), 3);
        assert_eq!(cells_to_cover(0.02, 0.01), 2);
        assert_eq!(cells_to_cover(0.0, 0.01), 0);
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((RiskWeights::default().total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounding_box_validation() {
        assert!(BoundingBox::PINELANDS.validate().is_ok());

        let inverted = BoundingBox {
            north: 39.0,
            ..BoundingBox::PINELANDS
        };
        assert!(inverted.validate().is_err());

        let nan = BoundingBox {
            west: f64::NAN,
            ..BoundingBox::PINELANDS
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_grid_config_rejects_bad_cell_size() {
        let config = GridConfig {
            cell_size_deg: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_grid_config_rejects_oversized_grid() {
        let tiny = GridConfig {
            cell_size_deg: 1e-7,
            ..Default::default()
        };
        let err = tiny.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "cell_size_deg", .. }));

        // span / cell overflows usize
        let degenerate = GridConfig {
            cell_size_deg: f64::MIN_POSITIVE,
            ..Default::default()
        };
        assert!(degenerate.validate().is_err());

        let fine = GridConfig {
            cell_size_deg: 0.001,
            ..Default::default()
        };
        assert!(fine.validate().is_ok());
    }

    #[test]
    fn test_cell_count_overflow() {
        assert_eq!(ensure_cell_count("x", 120, 80), Ok(9600));
        assert!(ensure_cell_count("x", usize::MAX, 2).is_err());
        assert!(ensure_cell_count("x", GridConfig::MAX_CELLS + 1, 1).is_err());
    }
}
