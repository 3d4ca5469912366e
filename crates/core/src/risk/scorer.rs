//! Final per-cell risk score

use crate::config::RiskWeights;
use crate::grid::analysis_grid::{GridCell, RiskGrid};
use crate::historical::WildfireRecord;
use crate::risk::historical_density::{calculate_historical_density, DensityStats};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Normalized inputs to [`calculate_risk_score`], each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactors {
    pub temperature: f64,
    /// Inverse-scaled: 1 = bone dry
    pub humidity: f64,
    pub wind_speed: f64,
    pub seasonality: f64,
    pub historical_density: f64,
}

impl Default for RiskFactors {
    /// Standing assumptions when no live weather is supplied: 75 °F, 50 %
    /// humidity, 10 mph wind, neutral seasonality.
    fn default() -> Self {
        RiskFactors {
            temperature: 0.75,
            humidity: 0.5,
            wind_speed: 10.0 / 30.0,
            seasonality: 0.5,
            historical_density: 0.0,
        }
    }
}

/// Weighted risk for one cell in [0, 1].
///
/// The five factors and the cell's vegetation risk are combined with
/// `weights`, then scaled by the slope modifier `1 + slope / 45` and clamped.
pub fn calculate_risk_score(factors: &RiskFactors, cell: &GridCell, weights: &RiskWeights) -> f64 {
    let env = &cell.environmental_factors;

    let weighted = factors.temperature * weights.temperature
        + factors.humidity * weights.humidity
        + factors.wind_speed * weights.wind_speed
        + factors.seasonality * weights.seasonality
        + factors.historical_density * weights.historical_density
        + env.vegetation_risk * weights.vegetation;

    let slope_modifier = 1.0 + *env.terrain.slope / 45.0;

    (weighted * slope_modifier).clamp(0.0, 1.0)
}

/// Recompute every cell's risk score.
///
/// Historical density is computed first (leaving the normalized density in
/// `risk_score`), then each cell is scored with `weather` plus its own
/// density.
pub fn update_risk_map(
    grid: &mut RiskGrid,
    fires: &[WildfireRecord],
    weather: &RiskFactors,
    weights: &RiskWeights,
) -> DensityStats {
    let stats = calculate_historical_density(fires, grid);

    grid.cells_mut().par_iter_mut().for_each(|cell| {
        let factors = RiskFactors {
            historical_density: cell.risk_score,
            ..*weather
        };
        cell.risk_score = calculate_risk_score(&factors, cell, weights);
    });

    info!(
        cells = grid.len(),
        fires_placed = stats.placed,
        "Risk map updated"
    );
    stats
}
