//! Probability that a burning cell ignites a neighbor during one step

use crate::config::SimulationConfig;
use crate::simulation::fire_cell::FireCell;
use crate::simulation::params::WindConditions;

/// Ignition probability from `source` to `target` at `current_time` minutes.
///
/// Zero unless `source` is burning. Otherwise the product of
///
/// - distance: `1 - d / (cell_size_meters * 0.001)`, `d` the degree distance
///   between the cells
/// - wind: `1 + speed * wind_speed_factor * max(0, cos(bearing - direction))`,
///   so downwind spread accelerates and upwind spread is not penalized
/// - slope: `1 + atan2(Δelevation, cell_size_meters)° * slope_factor`
/// - the target's vegetation risk
/// - burn decay: `max(0, 1 - time_burning / burn_duration)`
///
/// clamped to [0, 1].
pub fn calculate_spread_probability(
    source: &FireCell,
    target: &FireCell,
    wind: &WindConditions,
    current_time: f64,
    config: &SimulationConfig,
) -> f64 {
    if !source.is_burning() {
        return 0.0;
    }

    let from = source.location();
    let to = target.location();

    let distance = from.degree_distance(&to);
    let mut probability = 1.0 - distance / (config.cell_size_meters * 0.001);

    let angle_diff = (from.bearing_to(&to) - *wind.direction).to_radians();
    let wind_direction_factor = angle_diff.cos();
    let wind_speed_factor = 1.0 + *wind.speed * config.wind_speed_factor * wind_direction_factor.max(0.0);
    probability *= wind_speed_factor;

    let elevation_diff = *target.cell.environmental_factors.terrain.elevation
        - *source.cell.environmental_factors.terrain.elevation;
    let slope_deg = elevation_diff.atan2(config.cell_size_meters).to_degrees();
    probability *= 1.0 + slope_deg * config.slope_factor;

    probability *= target.cell.environmental_factors.vegetation_risk;

    let time_burning = current_time - source.burn_start_time.unwrap_or(0.0);
    let burn_duration = source.burn_duration.unwrap_or(1.0);
    probability *= (1.0 - time_burning / burn_duration).max(0.0);

    probability.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::{Degrees, Meters, MilesPerHour};
    use crate::grid::analysis_grid::{EnvironmentalFactors, GridCell};
    use crate::grid::terrain::{TerrainSample, VegetationSample};
    use approx::assert_relative_eq;

    fn fire_cell(lat: f64, lng: f64, elevation: f64, vegetation_risk: f64) -> FireCell {
        FireCell::new(GridCell::new(
            lat,
            lng,
            EnvironmentalFactors {
                vegetation: VegetationSample::default(),
                terrain: TerrainSample {
                    elevation: Meters::new(elevation),
                    slope: Degrees::new(0.0),
                },
                vegetation_risk,
            },
        ))
    }

    fn burning(lat: f64, lng: f64) -> FireCell {
        let mut cell = fire_cell(lat, lng, 20.0, 1.0);
        cell.ignite(0.0);
        cell
    }

    fn distance_term(source: &FireCell, target: &FireCell) -> f64 {
        1.0 - source.location().degree_distance(&target.location()) / 0.1
    }

    #[test]
    fn test_zero_when_source_not_burning() {
        let config = SimulationConfig::default();
        let source = fire_cell(39.80, -74.50, 20.0, 1.0);
        let target = fire_cell(39.81, -74.50, 20.0, 1.0);
        let gale = WindConditions::new(MilesPerHour::new(60.0), Degrees::new(0.0));
        assert_eq!(calculate_spread_probability(&source, &target, &gale, 0.0, &config), 0.0);

        let mut spent = burning(39.80, -74.50);
        spent.extinguish_if_spent(500.0);
        assert_eq!(calculate_spread_probability(&spent, &target, &gale, 500.0, &config), 0.0);
    }

    #[test]
    fn test_calm_flat_north_neighbor() {
        let config = SimulationConfig::default();
        let source = burning(39.80, -74.50);
        let target = fire_cell(39.81, -74.50, 20.0, 1.0);
        let p = calculate_spread_probability(&source, &target, &WindConditions::calm(), 0.0, &config);
        assert_relative_eq!(p, 0.9, epsilon = 1e-9);
    }

    #[test]
    fn test_downwind_accelerates_upwind_unpenalized() {
        let config = SimulationConfig::default();
        let source = burning(39.80, -74.50);
        let east = fire_cell(39.80, -74.49, 20.0, 0.5);
        let west = fire_cell(39.80, -74.51, 20.0, 0.5);
        let eastward = WindConditions::new(MilesPerHour::new(2.0), Degrees::new(90.0));

        let base = distance_term(&source, &east) * 0.5;
        let downwind = calculate_spread_probability(&source, &east, &eastward, 0.0, &config);
        assert_relative_eq!(downwind, base * 1.4, epsilon = 1e-9);

        let upwind = calculate_spread_probability(&source, &west, &eastward, 0.0, &config);
        assert_relative_eq!(upwind, distance_term(&source, &west) * 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_uphill_faster_than_downhill() {
        let config = SimulationConfig::default();
        let source = burning(39.80, -74.50);
        let uphill = fire_cell(39.81, -74.50, 30.0, 0.5);
        let downhill = fire_cell(39.81, -74.50, 10.0, 0.5);
        let calm = WindConditions::calm();

        let up = calculate_spread_probability(&source, &uphill, &calm, 0.0, &config);
        let down = calculate_spread_probability(&source, &downhill, &calm, 0.0, &config);
        let slope = 10.0_f64.atan2(100.0).to_degrees();
        let base = distance_term(&source, &uphill) * 0.5;
        assert_relative_eq!(up, base * (1.0 + slope * 0.1), epsilon = 1e-9);
        assert_relative_eq!(down, base * (1.0 - slope * 0.1), epsilon = 1e-9);
    }

    #[test]
    fn test_decays_over_burn() {
        let config = SimulationConfig::default();
        let source = burning(39.80, -74.50);
        let target = fire_cell(39.81, -74.50, 20.0, 1.0);
        let calm = WindConditions::calm();

        let fresh = calculate_spread_probability(&source, &target, &calm, 0.0, &config);
        let half = calculate_spread_probability(&source, &target, &calm, 60.0, &config);
        let done = calculate_spread_probability(&source, &target, &calm, 120.0, &config);
        assert_relative_eq!(half, fresh * 0.5, epsilon = 1e-12);
        assert_eq!(done, 0.0);
    }

    #[test]
    fn test_diagonal_lower_than_orthogonal() {
        let config = SimulationConfig::default();
        let source = burning(39.80, -74.50);
        let calm = WindConditions::calm();
        let north = fire_cell(39.81, -74.50, 20.0, 1.0);
        let northeast = fire_cell(39.81, -74.49, 20.0, 1.0);
        let p_n = calculate_spread_probability(&source, &north, &calm, 0.0, &config);
        let p_ne = calculate_spread_probability(&source, &northeast, &calm, 0.0, &config);
        assert!(p_ne < p_n);
        assert_relative_eq!(p_ne, 1.0 - 0.01 * 2.0_f64.sqrt() / 0.1, epsilon = 1e-9);
    }
}
