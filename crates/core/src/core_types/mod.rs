//! Core types and utilities

pub mod geo;
pub mod units;
pub mod vegetation;

pub use geo::{compass_point, GeoPoint, HeatmapPoint};
pub use units::*;
pub use vegetation::{FuelType, VegetationCatalog, VegetationCategory, VegetationType};
