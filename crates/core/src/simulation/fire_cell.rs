//! Per-cell simulation state

use crate::core_types::geo::GeoPoint;
use crate::grid::analysis_grid::GridCell;
use serde::{Deserialize, Serialize};

/// Minutes a cell burns before it is spent
pub const BURN_DURATION_MINUTES: f64 = 120.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BurnState {
    #[default]
    Unburned,
    Burning,
    BurnedOut,
}

/// A grid cell snapshot plus its burn state for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireCell {
    #[serde(flatten)]
    pub cell: GridCell,
    pub state: BurnState,
    /// Minutes since simulation start
    pub burn_start_time: Option<f64>,
    /// Minutes
    pub burn_duration: Option<f64>,
    /// Highest ignition probability offered by a burning neighbor at the last
    /// evaluated step
    pub spread_probability: f64,
}

impl FireCell {
    pub fn new(cell: GridCell) -> Self {
        FireCell {
            cell,
            state: BurnState::Unburned,
            burn_start_time: None,
            burn_duration: None,
            spread_probability: 0.0,
        }
    }

    pub fn location(&self) -> GeoPoint {
        self.cell.location()
    }

    pub fn is_burning(&self) -> bool {
        self.state == BurnState::Burning
    }

    /// Burning or already burned out
    pub fn has_ignited(&self) -> bool {
        self.state != BurnState::Unburned
    }

    pub(crate) fn ignite(&mut self, time: f64) {
        self.state = BurnState::Burning;
        self.burn_start_time = Some(time);
        self.burn_duration = Some(BURN_DURATION_MINUTES);
    }

    /// Minutes at which the fire in this cell is spent
    pub fn burn_end_time(&self) -> Option<f64> {
        Some(self.burn_start_time? + self.burn_duration?)
    }

    /// Move a burning cell to `BurnedOut` once `time` is past its end.
    /// Returns true if the state changed.
    pub(crate) fn extinguish_if_spent(&mut self, time: f64) -> bool {
        match (self.state, self.burn_end_time()) {
            (BurnState::Burning, Some(end)) if time > end => {
                self.state = BurnState::BurnedOut;
                true
            }
            _ => false,
        }
    }

    /// Heatmap weight: 1 once ignited, otherwise the spread probability
    pub fn heat_weight(&self) -> f64 {
        if self.has_ignited() {
            1.0
        } else {
            self.spread_probability
        }
    }
}
