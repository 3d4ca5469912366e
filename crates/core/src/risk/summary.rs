//! Grid-wide risk statistics for display

use crate::grid::analysis_grid::RiskGrid;
use serde::Serialize;
use std::fmt;

/// Banding of a 0-1 risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Scores at or above this are high risk
    pub const HIGH_THRESHOLD: f64 = 0.67;
    /// Scores below this are low risk
    pub const LOW_THRESHOLD: f64 = 0.33;

    pub fn from_score(score: f64) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            RiskLevel::High
        } else if score < Self::LOW_THRESHOLD {
            RiskLevel::Low
        } else {
            RiskLevel::Medium
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.write_str(label)
    }
}

/// Cells at or above [`RiskLevel::HIGH_THRESHOLD`]
pub fn count_high_risk_cells(grid: &RiskGrid) -> usize {
    grid.cells()
        .iter()
        .filter(|c| RiskLevel::from_score(c.risk_score) == RiskLevel::High)
        .count()
}

/// Mean risk score, 0 for an empty grid
pub fn average_risk(grid: &RiskGrid) -> f64 {
    if grid.is_empty() {
        return 0.0;
    }
    grid.cells().iter().map(|c| c.risk_score).sum::<f64>() / grid.len() as f64
}

/// Snapshot of a scored grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    pub cells: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub average: f64,
    pub max: f64,
}

impl RiskSummary {
    pub fn from_grid(grid: &RiskGrid) -> Self {
        let mut summary = RiskSummary {
            cells: grid.len(),
            low: 0,
            medium: 0,
            high: 0,
            average: average_risk(grid),
            max: 0.0,
        };
        for cell in grid.cells() {
            match RiskLevel::from_score(cell.risk_score) {
                RiskLevel::Low => summary.low += 1,
                RiskLevel::Medium => summary.medium += 1,
                RiskLevel::High => summary.high += 1,
            }
            summary.max = summary.max.max(cell.risk_score);
        }
        summary
    }

    /// Overall level from the average score
    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_score(self.average)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::geo::GeoPoint;
    use crate::grid::analysis_grid::{EnvironmentalFactors, GridCell};
    use crate::grid::terrain::{TerrainSample, VegetationSample};

    fn grid_with_scores(scores: &[f64]) -> RiskGrid {
        let factors = EnvironmentalFactors {
            vegetation: VegetationSample::default(),
            terrain: TerrainSample::default(),
            vegetation_risk: 0.5,
        };
        let cells = scores
            .iter()
            .enumerate()
            .map(|(i, &score)| {
                let mut cell = GridCell::new(39.8, -74.5 + i as f64 * 0.01, factors);
                cell.risk_score = score;
                cell
            })
            .collect();
        RiskGrid::from_cells(GeoPoint::new(39.8, -74.5), 0.01, 1, scores.len(), cells).unwrap()
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.3299), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.33), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.6699), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.67), RiskLevel::High);
        assert_eq!(RiskLevel::High.to_string(), "High");
    }

    #[test]
    fn test_summary_counts() {
        let grid = grid_with_scores(&[0.1, 0.5, 0.7, 0.9]);
        assert_eq!(count_high_risk_cells(&grid), 2);
        assert!((average_risk(&grid) - 0.55).abs() < 1e-12);

        let summary = RiskSummary::from_grid(&grid);
        assert_eq!((summary.low, summary.medium, summary.high), (1, 1, 2));
        assert_eq!(summary.max, 0.9);
        assert_eq!(summary.level(), RiskLevel::Medium);
    }

    #[test]
    fn test_empty_grid_average() {
        let grid = RiskGrid::from_cells(GeoPoint::new(39.8, -74.5), 0.01, 0, 0, Vec::new()).unwrap();
        assert_eq!(average_risk(&grid), 0.0);
        assert_eq!(count_high_risk_cells(&grid), 0);
    }
}
