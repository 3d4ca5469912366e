//! Pine Barrens vegetation classes and their fire-relevant properties
//!
//! Values follow the New Jersey Forest Fire Service fuel descriptions for the
//! Pinelands: pitch pine uplands carry the heaviest, driest fuel while cedar
//! swamps and shrub wetlands stay wet most of the year.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Broad vegetation grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VegetationCategory {
    Pine,
    Oak,
    Mixed,
    Wetland,
    Shrub,
}

/// Key into the vegetation catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelType {
    PitchPine,
    ShortleafPine,
    VirginiaPine,
    ScarletOak,
    WhiteOak,
    ScrubOak,
    MixedPineOak,
    PineShrubland,
    WetlandForest,
    CedarSwamp,
    ShrubWetland,
}

impl FuelType {
    /// Every fuel type, in catalog order
    pub const ALL: [FuelType; 11] = [
        FuelType::PitchPine,
        FuelType::ShortleafPine,
        FuelType::VirginiaPine,
        FuelType::ScarletOak,
        FuelType::WhiteOak,
        FuelType::ScrubOak,
        FuelType::MixedPineOak,
        FuelType::PineShrubland,
        FuelType::WetlandForest,
        FuelType::CedarSwamp,
        FuelType::ShrubWetland,
    ];

    /// Upper-snake-case key, e.g. `PITCH_PINE`
    pub fn key(self) -> &'static str {
        match self {
            FuelType::PitchPine => "PITCH_PINE",
            FuelType::ShortleafPine => "SHORTLEAF_PINE",
            FuelType::VirginiaPine => "VIRGINIA_PINE",
            FuelType::ScarletOak => "SCARLET_OAK",
            FuelType::WhiteOak => "WHITE_OAK",
            FuelType::ScrubOak => "SCRUB_OAK",
            FuelType::MixedPineOak => "MIXED_PINE_OAK",
            FuelType::PineShrubland => "PINE_SHRUBLAND",
            FuelType::WetlandForest => "WETLAND_FOREST",
            FuelType::CedarSwamp => "CEDAR_SWAMP",
            FuelType::ShrubWetland => "SHRUB_WETLAND",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a string does not name a known fuel type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFuelType(pub String);

impl fmt::Display for UnknownFuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown fuel type '{}'", self.0)
    }
}

impl std::error::Error for UnknownFuelType {}

impl FromStr for FuelType {
    type Err = UnknownFuelType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FuelType::ALL
            .iter()
            .copied()
            .find(|fuel| fuel.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownFuelType(s.to_string()))
    }
}

/// Static description of one vegetation class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegetationType {
    pub name: String,
    pub category: VegetationCategory,
    pub flammability: f64,     // 0-1 scale
    pub fuel_load: f64,        // tons per acre
    pub moisture_content: f64, // percent
    pub canopy_cover: f64,     // percent
    pub description: String,
}

impl VegetationType {
    /// Heaviest fuel load in the Pinelands catalog (tons/acre), used to normalize
    pub const MAX_FUEL_LOAD: f64 = 15.0;

    fn entry(
        name: &str,
        category: VegetationCategory,
        flammability: f64,
        fuel_load: f64,
        moisture_content: f64,
        canopy_cover: f64,
        description: &str,
    ) -> Self {
        VegetationType {
            name: name.to_string(),
            category,
            flammability,
            fuel_load,
            moisture_content,
            canopy_cover,
            description: description.to_string(),
        }
    }

    /// Pitch pine - the dominant, resinous upland pine
    pub fn pitch_pine() -> Self {
        Self::entry(
            "Pitch Pine",
            VegetationCategory::Pine,
            0.9,
            15.0,
            30.0,
            70.0,
            "Dominant pine species, highly flammable with resinous needles",
        )
    }

    pub fn shortleaf_pine() -> Self {
        Self::entry(
            "Shortleaf Pine",
            VegetationCategory::Pine,
            0.85,
            12.0,
            35.0,
            65.0,
            "Common pine species with moderate to high flammability",
        )
    }

    pub fn virginia_pine() -> Self {
        Self::entry(
            "Virginia Pine",
            VegetationCategory::Pine,
            0.8,
            10.0,
            40.0,
            60.0,
            "Pine species with dense branches and high resin content",
        )
    }

    pub fn scarlet_oak() -> Self {
        Self::entry(
            "Scarlet Oak",
            VegetationCategory::Oak,
            0.6,
            8.0,
            45.0,
            75.0,
            "Deciduous oak with moderate flammability",
        )
    }

    pub fn white_oak() -> Self {
        Self::entry(
            "White Oak",
            VegetationCategory::Oak,
            0.5,
            7.0,
            50.0,
            80.0,
            "Large deciduous oak with lower flammability",
        )
    }

    pub fn scrub_oak() -> Self {
        Self::entry(
            "Scrub Oak",
            VegetationCategory::Oak,
            0.7,
            5.0,
            35.0,
            40.0,
            "Small, dense oak species common in understory",
        )
    }

    pub fn mixed_pine_oak() -> Self {
        Self::entry(
            "Mixed Pine-Oak",
            VegetationCategory::Mixed,
            0.75,
            11.0,
            40.0,
            70.0,
            "Mixed forest type with both pine and oak species",
        )
    }

    pub fn pine_shrubland() -> Self {
        Self::entry(
            "Pine Shrubland",
            VegetationCategory::Shrub,
            0.85,
            8.0,
            30.0,
            45.0,
            "Open areas with scattered pines and dense shrub understory",
        )
    }

    pub fn wetland_forest() -> Self {
        Self::entry(
            "Wetland Forest",
            VegetationCategory::Wetland,
            0.3,
            6.0,
            70.0,
            85.0,
            "Forested wetlands with high moisture content",
        )
    }

    /// Atlantic white cedar swamp
    pub fn cedar_swamp() -> Self {
        Self::entry(
            "Cedar Swamp",
            VegetationCategory::Wetland,
            0.4,
            9.0,
            65.0,
            90.0,
            "Atlantic white cedar swamps with high moisture",
        )
    }

    pub fn shrub_wetland() -> Self {
        Self::entry(
            "Shrub Wetland",
            VegetationCategory::Wetland,
            0.25,
            4.0,
            75.0,
            50.0,
            "Wetland areas dominated by shrubs",
        )
    }

    /// Catalog entry for a fuel type
    pub fn for_fuel(fuel: FuelType) -> Self {
        match fuel {
            FuelType::PitchPine => Self::pitch_pine(),
            FuelType::ShortleafPine => Self::shortleaf_pine(),
            FuelType::VirginiaPine => Self::virginia_pine(),
            FuelType::ScarletOak => Self::scarlet_oak(),
            FuelType::WhiteOak => Self::white_oak(),
            FuelType::ScrubOak => Self::scrub_oak(),
            FuelType::MixedPineOak => Self::mixed_pine_oak(),
            FuelType::PineShrubland => Self::pine_shrubland(),
            FuelType::WetlandForest => Self::wetland_forest(),
            FuelType::CedarSwamp => Self::cedar_swamp(),
            FuelType::ShrubWetland => Self::shrub_wetland(),
        }
    }
}

/// Lookup table from fuel type to vegetation properties.
///
/// Built once at startup and shared read-only. A catalog may deliberately omit
/// entries; lookups for missing fuel types return `None` and the risk model
/// falls back to a neutral score.
#[derive(Debug, Clone, Default)]
pub struct VegetationCatalog {
    entries: FxHashMap<FuelType, VegetationType>,
}

impl VegetationCatalog {
    /// Catalog with all eleven Pinelands vegetation classes
    pub fn pinelands() -> Self {
        let entries = FuelType::ALL
            .iter()
            .map(|&fuel| (fuel, VegetationType::for_fuel(fuel)))
            .collect();
        VegetationCatalog { entries }
    }

    /// Look up the properties of a fuel type
    pub fn get(&self, fuel: FuelType) -> Option<&VegetationType> {
        self.entries.get(&fuel)
    }

    /// Replace or add the entry for a fuel type
    pub fn insert(&mut self, fuel: FuelType, vegetation: VegetationType) {
        self.entries.insert(fuel, vegetation);
    }

    /// Drop the entry for a fuel type
    pub fn remove(&mut self, fuel: FuelType) -> Option<VegetationType> {
        self.entries.remove(&fuel)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
