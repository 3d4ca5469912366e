//! Historical fire density overlay

use crate::grid::analysis_grid::RiskGrid;
use crate::historical::WildfireRecord;
use tracing::debug;

/// Outcome of placing historical records onto a grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DensityStats {
    /// Records that landed in a cell
    pub placed: usize,
    /// Records outside the grid, ignored
    pub dropped: usize,
    /// Highest per-cell count
    pub max_fires: u32,
}

/// Count historical fires per cell and normalize.
///
/// Existing counts are reset first. Each record is bucketed with
/// `floor((coord - origin) / cell_size)`; records outside the grid are
/// skipped. Every cell's `risk_score` is then set to
/// `historical_fires / max_fires`, or 0 when no record was placed.
pub fn calculate_historical_density(fires: &[WildfireRecord], grid: &mut RiskGrid) -> DensityStats {
    for cell in grid.cells_mut() {
        cell.historical_fires = 0;
    }

    let mut stats = DensityStats::default();
    for fire in fires {
        let (lat, lng) = (fire.location.lat, fire.location.lng);
        let Some((row, col)) = grid.index_of(lat, lng) else {
            debug!(id = %fire.id, lat, lng, "Historical fire outside grid, skipped");
            stats.dropped += 1;
            continue;
        };
        if let Some(cell) = grid.get_mut(row, col) {
            cell.historical_fires += 1;
            stats.max_fires = stats.max_fires.max(cell.historical_fires);
            stats.placed += 1;
        }
    }

    let max = f64::from(stats.max_fires);
    for cell in grid.cells_mut() {
        cell.risk_score = if stats.max_fires > 0 {
            f64::from(cell.historical_fires) / max
        } else {
            0.0
        };
    }

    debug!(
        placed = stats.placed,
        dropped = stats.dropped,
        max_fires = stats.max_fires,
        "Historical density computed"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::core_types::vegetation::VegetationCatalog;
    use crate::grid::terrain::SyntheticTerrain;
    use crate::historical::pinelands_wildfires;

    fn grid() -> RiskGrid {
        let config = GridConfig::default();
        let terrain = SyntheticTerrain::pinelands(config.terrain_seed);
        RiskGrid::build(&config, &terrain, &VegetationCatalog::pinelands()).unwrap()
    }

    fn fire_at(id: &str, lat: f64, lng: f64) -> WildfireRecord {
        let mut record = pinelands_wildfires().remove(0);
        record.id = id.to_owned();
        record.location.lat = lat;
        record.location.lng = lng;
        record
    }

    #[test]
    fn test_busiest_cell_normalizes_to_one() {
        let mut grid = grid();
        let fires = vec![
            fire_at("a", 39.805, -74.505),
            fire_at("b", 39.801, -74.509),
            fire_at("c", 39.809, -74.501),
            fire_at("d", 39.605, -74.405),
        ];
        let stats = calculate_historical_density(&fires, &mut grid);
        assert_eq!(stats.max_fires, 3);
        assert_eq!(stats.placed, 4);

        let busy = grid.cell_containing(39.805, -74.505).unwrap();
        assert_eq!(busy.historical_fires, 3);
        assert_eq!(busy.risk_score, 1.0);

        let single = grid.cell_containing(39.605, -74.405).unwrap();
        assert!((single.risk_score - 1.0 / 3.0).abs() < 1e-12);

        let empty = grid.cell_containing(40.0, -74.3).unwrap();
        assert_eq!(empty.historical_fires, 0);
        assert_eq!(empty.risk_score, 0.0);
    }

    #[test]
    fn test_out_of_bounds_records_dropped() {
        let mut grid = grid();
        // Pheasant Run sits just west of the analysis box
        let fires: Vec<_> = pinelands_wildfires()
            .into_iter()
            .filter(|f| f.id == "pheasant-run-2024")
            .collect();
        let stats = calculate_historical_density(&fires, &mut grid);
        assert_eq!(stats.dropped, 1);
        assert_eq!(stats.max_fires, 0);
        assert!(grid.cells().iter().all(|c| c.risk_score == 0.0));
    }

    #[test]
    fn test_no_fires_zero_density() {
        let mut grid = grid();
        let stats = calculate_historical_density(&[], &mut grid);
        assert_eq!(stats, DensityStats::default());
        assert!(grid.cells().iter().all(|c| c.risk_score == 0.0));
    }

    #[test]
    fn test_recount_resets_previous_counts() {
        let mut grid = grid();
        let fires = pinelands_wildfires();
        calculate_historical_density(&fires, &mut grid);
        let stats = calculate_historical_density(&fires, &mut grid);
        let total: u32 = grid.cells().iter().map(|c| c.historical_fires).sum();
        assert_eq!(total as usize, stats.placed);
        assert_eq!(stats.placed + stats.dropped, fires.len());
    }
}
