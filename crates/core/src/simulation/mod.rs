//! Discrete-time probabilistic fire spread over a risk grid
//!
//! Each run owns a private [`FireCell`] snapshot of the grid. Per step:
//!
//! 1. burning cells past their burn duration become `BurnedOut`
//! 2. one row-major pass over the grid: each unburned cell takes the highest
//!    spread probability offered by a burning Moore neighbor, then a uniform
//!    draw decides ignition
//!
//! The pass updates cells in place, so a cell ignited earlier in the pass
//! already spreads to the cells after it. Draws are taken in pass order, so a
//! seeded RNG reproduces the same burn sequence.

pub mod fire_cell;
pub mod params;
pub mod spread;

pub use fire_cell::{BurnState, FireCell, BURN_DURATION_MINUTES};
pub use params::{SimulationParameters, WindConditions};
pub use spread::calculate_spread_probability;

use crate::config::SimulationConfig;
use crate::core_types::geo::HeatmapPoint;
use crate::error::{Error, Result};
use crate::grid::analysis_grid::RiskGrid;
use rand::Rng;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Moore neighborhood offsets (row, col)
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// What happened during one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    /// 0-based step index
    pub step: usize,
    /// Minutes since ignition at the start of the step
    pub time: f64,
    /// Cells that caught fire this step
    pub ignited: usize,
    /// Cells that burned out this step
    pub extinguished: usize,
    /// Cells burning after the step
    pub burning: usize,
    /// Cells burned out after the step
    pub burned_out: usize,
}

/// One fire-spread run
#[derive(Debug, Clone)]
pub struct FireSpreadSimulation {
    rows: usize,
    cols: usize,
    cells: Vec<FireCell>,
    params: SimulationParameters,
    config: SimulationConfig,
    total_steps: usize,
    current_step: usize,
    ignition: (usize, usize),
}

impl FireSpreadSimulation {
    /// Snapshot `grid` and ignite the cell matching the ignition point.
    ///
    /// # Arguments
    ///
    /// * `grid` - Scored risk grid; it is copied, never modified
    /// * `params` - Ignition point, wind, duration (hours) and step (minutes)
    /// * `config` - Spread-model tuning and step cap
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyGrid`] if the grid has no cells
    /// - [`Error::InvalidParameter`] / [`Error::TooManySteps`] from
    ///   [`SimulationParameters::validate`]
    /// - [`Error::IgnitionOutsideGrid`] if no cell's corner lies within
    ///   `config.ignition_tolerance_deg` of the ignition point
    pub fn new(grid: &RiskGrid, params: SimulationParameters, config: SimulationConfig) -> Result<Self> {
        if grid.is_empty() {
            return Err(Error::EmptyGrid);
        }
        let total_steps = params.validate(&config)?;

        let (rows, cols) = (grid.rows(), grid.cols());
        let mut cells: Vec<FireCell> = grid.cells().iter().cloned().map(FireCell::new).collect();

        let ignition = Self::locate_ignition(&cells, cols, &params, config.ignition_tolerance_deg)
            .ok_or(Error::IgnitionOutsideGrid {
                lat: params.ignition_point.lat,
                lng: params.ignition_point.lng,
            })?;
        cells[ignition.0 * cols + ignition.1].ignite(0.0);

        info!(
            "Fire-spread simulation ready: {}x{} cells, ignition at ({}, {}), {} steps of {} min",
            rows, cols, ignition.0, ignition.1, total_steps, params.time_step
        );

        Ok(FireSpreadSimulation {
            rows,
            cols,
            cells,
            params,
            config,
            total_steps,
            current_step: 0,
            ignition,
        })
    }

    /// Nearest cell whose corner is within `tolerance` on both axes
    fn locate_ignition(
        cells: &[FireCell],
        cols: usize,
        params: &SimulationParameters,
        tolerance: f64,
    ) -> Option<(usize, usize)> {
        let target = params.ignition_point;
        cells
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                (c.cell.lat - target.lat).abs() < tolerance && (c.cell.lng - target.lng).abs() < tolerance
            })
            .min_by(|(_, a), (_, b)| {
                let da = a.location().degree_distance(&target);
                let db = b.location().degree_distance(&target);
                da.total_cmp(&db)
            })
            .map(|(idx, _)| (idx / cols, idx % cols))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[FireCell] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&FireCell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// (row, col) of the ignited cell
    pub fn ignition_cell(&self) -> (usize, usize) {
        self.ignition
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Steps taken so far
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Minutes simulated so far
    pub fn elapsed_minutes(&self) -> f64 {
        self.current_step as f64 * self.params.time_step
    }

    pub fn is_finished(&self) -> bool {
        self.current_step >= self.total_steps
    }

    pub fn burning_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_burning()).count()
    }

    pub fn burned_out_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.state == BurnState::BurnedOut)
            .count()
    }

    /// Highest spread probability any burning neighbor offers cell `idx`
    fn max_neighbor_probability(&self, idx: usize, time: f64) -> f64 {
        let row = idx / self.cols;
        let col = idx % self.cols;
        let target = &self.cells[idx];

        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| {
                let nr = row.checked_add_signed(dr)?;
                let nc = col.checked_add_signed(dc)?;
                self.get(nr, nc)
            })
            .map(|source| {
                calculate_spread_probability(
                    source,
                    target,
                    &self.params.wind_conditions,
                    time,
                    &self.config,
                )
            })
            .fold(0.0, f64::max)
    }

    /// Advance one step. Returns `None` once all steps have run.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<StepReport> {
        if self.is_finished() {
            return None;
        }
        let step = self.current_step;
        let time = step as f64 * self.params.time_step;

        let mut extinguished = 0;
        for cell in &mut self.cells {
            if cell.extinguish_if_spent(time) {
                extinguished += 1;
            }
        }

        // In place: cells ignited earlier in this pass count as burning sources
        let mut ignited = 0;
        for idx in 0..self.cells.len() {
            if self.cells[idx].has_ignited() {
                continue;
            }
            let probability = self.max_neighbor_probability(idx, time);
            let cell = &mut self.cells[idx];
            cell.spread_probability = probability;
            if probability > 0.0 && rng.random::<f64>() < probability {
                cell.ignite(time);
                ignited += 1;
            }
        }

        self.current_step += 1;
        let report = StepReport {
            step,
            time,
            ignited,
            extinguished,
            burning: self.burning_count(),
            burned_out: self.burned_out_count(),
        };
        debug!(
            step,
            time,
            ignited,
            burning = report.burning,
            burned_out = report.burned_out,
            "Fire-spread step"
        );
        Some(report)
    }

    /// Run every remaining step
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<StepReport> {
        let mut reports = Vec::with_capacity(self.total_steps - self.current_step);
        while let Some(report) = self.step(rng) {
            reports.push(report);
        }
        self.log_finished();
        reports
    }

    /// Run every remaining step, checking `cancel` before each one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] with the number of completed steps if
    /// `cancel` is set. The simulation keeps its partial state and can be
    /// resumed.
    pub fn run_cancellable<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        cancel: &AtomicBool,
    ) -> Result<Vec<StepReport>> {
        let mut reports = Vec::new();
        while !self.is_finished() {
            if cancel.load(Ordering::Relaxed) {
                info!(step = self.current_step, "Fire-spread simulation cancelled");
                return Err(Error::Cancelled {
                    step: self.current_step,
                });
            }
            reports.extend(self.step(rng));
        }
        self.log_finished();
        Ok(reports)
    }

    fn log_finished(&self) {
        info!(
            "Fire-spread simulation finished: {} steps, {} burning, {} burned out",
            self.current_step,
            self.burning_count(),
            self.burned_out_count()
        );
    }

    /// Weight 1 for ignited cells, otherwise the last spread probability
    pub fn heatmap(&self) -> Vec<HeatmapPoint> {
        self.cells
            .iter()
            .map(|c| HeatmapPoint {
                lat: c.cell.lat,
                lng: c.cell.lng,
                weight: c.heat_weight(),
            })
            .collect()
    }

    /// Final state as nested rows, south to north
    pub fn into_rows(self) -> Vec<Vec<FireCell>> {
        let cols = self.cols.max(1);
        let mut rows = Vec::with_capacity(self.rows);
        let mut cells = self.cells.into_iter();
        for _ in 0..self.rows {
            rows.push(cells.by_ref().take(cols).collect());
        }
        rows
    }
}
