//! Pinelands Wildfire Risk Core Library
//!
//! Wildfire risk analysis for the New Jersey Pinelands. The region is tiled
//! into ~1 km cells, each scored from vegetation, terrain, weather, season and
//! fire history; a probabilistic cellular model then spreads fire from an
//! ignition point under given wind.
//!
//! ## Pipeline
//!
//! - [`grid::TerrainProvider`] supplies elevation, slope and vegetation per point
//! - [`risk::calculate_vegetation_risk`] turns those into a fuel risk
//! - [`RiskGrid::build`] tiles the bounding box
//! - [`risk::update_risk_map`] overlays historical fires and weather
//! - [`FireSpreadSimulation`] runs the spread model on a snapshot of the grid
//!
//! ```
//! use chrono::NaiveDate;
//! use pinelands_risk_core::{build_pinelands_risk_grid, historical, RiskSummary};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
//! let grid = build_pinelands_risk_grid(None, &historical::pinelands_wildfires(), date).unwrap();
//! let summary = RiskSummary::from_grid(&grid);
//! assert_eq!(summary.cells, 120 * 80);
//! ```

pub mod config;
pub mod core_types;
pub mod error;
pub mod grid;
pub mod historical;
pub mod pipeline;
pub mod risk;
pub mod simulation;
pub mod weather;

pub use config::{BoundingBox, GridConfig, RiskWeights, SimulationConfig};
pub use core_types::{GeoPoint, HeatmapPoint};
pub use error::{Error, Result};
pub use grid::{GridCell, RiskGrid, SyntheticTerrain, TerrainProvider};
pub use historical::WildfireRecord;
pub use pipeline::{build_pinelands_risk_grid, build_risk_grid, run_fire_spread_simulation};
pub use risk::{RiskFactors, RiskLevel, RiskSummary};
pub use simulation::{
    BurnState, FireCell, FireSpreadSimulation, SimulationParameters, StepReport, WindConditions,
};
pub use weather::{current_fire_season, seasonal_risk, FireSeason, WeatherReading};
