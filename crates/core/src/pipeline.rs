//! End-to-end entry points: build a scored grid, run a fire-spread simulation

use crate::config::{GridConfig, RiskWeights, SimulationConfig};
use crate::core_types::vegetation::VegetationCatalog;
use crate::error::Result;
use crate::grid::analysis_grid::RiskGrid;
use crate::grid::terrain::{SyntheticTerrain, TerrainProvider};
use crate::historical::WildfireRecord;
use crate::risk::scorer::update_risk_map;
use crate::simulation::{FireCell, FireSpreadSimulation, SimulationParameters};
use crate::weather::{normalize_weather, WeatherReading};
use chrono::NaiveDate;
use rand::Rng;

/// Build the analysis grid and score every cell.
///
/// Without a live `weather` reading the scorer's standing assumptions
/// ([`crate::risk::RiskFactors::default`]) are used; with one, its normalized values and
/// the seasonal risk for `date` replace them.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidParameter`] if `config` is invalid.
pub fn build_risk_grid(
    config: &GridConfig,
    weights: &RiskWeights,
    provider: &dyn TerrainProvider,
    weather: Option<&WeatherReading>,
    fires: &[WildfireRecord],
    date: NaiveDate,
) -> Result<RiskGrid> {
    let mut grid = RiskGrid::build(config, provider, &VegetationCatalog::pinelands())?;
    let factors = normalize_weather(weather, date);
    update_risk_map(&mut grid, fires, &factors, weights);
    Ok(grid)
}

/// [`build_risk_grid`] over the default Pinelands grid and synthetic terrain
///
/// # Errors
///
/// Only if the default configuration were invalid.
pub fn build_pinelands_risk_grid(
    weather: Option<&WeatherReading>,
    fires: &[WildfireRecord],
    date: NaiveDate,
) -> Result<RiskGrid> {
    let config = GridConfig::default();
    let terrain = SyntheticTerrain::pinelands(config.terrain_seed);
    build_risk_grid(&config, &RiskWeights::default(), &terrain, weather, fires, date)
}

/// Run a complete simulation on a snapshot of `grid` and return the final
/// cell states, south to north.
///
/// # Errors
///
/// See [`FireSpreadSimulation::new`].
pub fn run_fire_spread_simulation<R: Rng + ?Sized>(
    grid: &RiskGrid,
    params: SimulationParameters,
    config: SimulationConfig,
    rng: &mut R,
) -> Result<Vec<Vec<FireCell>>> {
    let mut simulation = FireSpreadSimulation::new(grid, params, config)?;
    simulation.run(rng);
    Ok(simulation.into_rows())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::{Fahrenheit, MilesPerHour, Percent};
    use crate::historical::pinelands_wildfires;
    use crate::risk::scorer::{calculate_risk_score, RiskFactors};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 20).unwrap()
    }

    #[test]
    fn test_live_weather_overrides_defaults() {
        let fires = pinelands_wildfires();
        let baseline = build_pinelands_risk_grid(None, &fires, date()).unwrap();

        let hot_dry = WeatherReading::new(Fahrenheit::new(95.0), Percent::new(15.0), MilesPerHour::new(25.0));
        let live = build_pinelands_risk_grid(Some(&hot_dry), &fires, date()).unwrap();

        let i = baseline
            .cells()
            .iter()
            .position(|c| c.historical_fires == 0)
            .unwrap();
        let base_cell = &baseline.cells()[i];
        let live_cell = &live.cells()[i];
        assert_eq!(base_cell.environmental_factors, live_cell.environmental_factors);
        assert!(live_cell.risk_score >= base_cell.risk_score);

        let expected = calculate_risk_score(&RiskFactors::default(), base_cell, &RiskWeights::default());
        assert!((base_cell.risk_score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_no_weather_scores_use_standing_assumptions() {
        let grid = build_pinelands_risk_grid(None, &[], date()).unwrap();
        let defaults = RiskFactors::default();
        for cell in grid.cells() {
            let expected = calculate_risk_score(&defaults, cell, &RiskWeights::default());
            assert!((cell.risk_score - expected).abs() < 1e-12);
        }
    }
}
