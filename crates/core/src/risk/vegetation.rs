//! Vegetation risk: fuel properties adjusted for plant health and terrain

use crate::core_types::vegetation::{VegetationCatalog, VegetationType};
use crate::grid::terrain::{TerrainSample, VegetationSample};

/// Score used when the fuel type has no catalog entry
pub const UNKNOWN_FUEL_RISK: f64 = 0.5;

/// Combine catalog properties, vegetation health and terrain into a 0-1 risk.
///
/// Base score is the weighted sum of flammability (0.3), fuel load relative to
/// 15 t/ac (0.2), dryness (0.2), canopy cover (0.1) and density (0.2). It is
/// then scaled by NDVI health `1 + (1 - ndvi) * 0.5`, slope `1 + slope / 45`
/// and elevation `1 + elevation / 100 * 0.2`, and clamped to [0, 1].
pub fn calculate_vegetation_risk(
    vegetation: &VegetationSample,
    terrain: &TerrainSample,
    catalog: &VegetationCatalog,
) -> f64 {
    let Some(veg_type) = catalog.get(vegetation.fuel_type) else {
        return UNKNOWN_FUEL_RISK;
    };

    let mut risk = base_fuel_risk(veg_type, vegetation.density);

    // Stressed or sparse vegetation dries out faster
    let ndvi_modifier = 1.0 + (1.0 - vegetation.ndvi) * 0.5;
    risk *= ndvi_modifier;

    // 45° doubles risk
    let slope_modifier = 1.0 + *terrain.slope / 45.0;
    risk *= slope_modifier;

    let elevation_modifier = 1.0 + (*terrain.elevation / 100.0) * 0.2;
    risk *= elevation_modifier;

    risk.clamp(0.0, 1.0)
}

fn base_fuel_risk(veg_type: &VegetationType, density: f64) -> f64 {
    let flammability = veg_type.flammability * 0.3;
    let fuel_load = (veg_type.fuel_load / VegetationType::MAX_FUEL_LOAD) * 0.2;
    let dryness = (100.0 - veg_type.moisture_content) / 100.0 * 0.2;
    let canopy = (veg_type.canopy_cover / 100.0) * 0.1;
    let density = density * 0.2;

    flammability + fuel_load + dryness + canopy + density
}
