//! Analysis grid and the terrain data behind it

pub mod analysis_grid;
pub mod terrain;

pub use analysis_grid::{EnvironmentalFactors, GridCell, RiskGrid};
pub use terrain::{SyntheticTerrain, TerrainProvider, TerrainSample, VegetationSample};
