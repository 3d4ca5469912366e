//! Risk scoring: vegetation risk, historical density and the combined
//! per-cell score

pub mod historical_density;
pub mod scorer;
pub mod summary;
pub mod vegetation;

pub use historical_density::{calculate_historical_density, DensityStats};
pub use scorer::{calculate_risk_score, update_risk_map, RiskFactors};
pub use summary::{average_risk, count_high_risk_cells, RiskLevel, RiskSummary};
pub use vegetation::calculate_vegetation_risk;
