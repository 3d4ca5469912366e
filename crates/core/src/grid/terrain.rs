//! Terrain and vegetation lookup for the analysis region
//!
//! Downstream code only sees the [`TerrainProvider`] trait: two point queries
//! returning elevation/slope and NDVI/fuel/density. [`SyntheticTerrain`] is a
//! deterministic stand-in generated from a seed; a DEM or remote-sensing
//! backed provider can replace it without touching the grid or risk code.

use crate::config::{cells_to_cover, ensure_cell_count, BoundingBox};
use crate::core_types::units::{Degrees, Meters};
use crate::core_types::vegetation::FuelType;
use crate::error::{ensure_positive, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Elevation and slope at a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainSample {
    pub elevation: Meters,
    pub slope: Degrees,
}

impl Default for TerrainSample {
    /// Value used when a location has no terrain data: 30 m, 5°
    fn default() -> Self {
        TerrainSample {
            elevation: Meters::new(30.0),
            slope: Degrees::new(5.0),
        }
    }
}

/// Remote-sensing style vegetation summary at a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VegetationSample {
    /// Normalized Difference Vegetation Index (0-1)
    pub ndvi: f64,
    pub fuel_type: FuelType,
    /// Canopy/fuel density (0-1)
    pub density: f64,
}

impl Default for VegetationSample {
    /// Value used when a location has no vegetation data
    fn default() -> Self {
        VegetationSample {
            ndvi: 0.5,
            fuel_type: FuelType::MixedPineOak,
            density: 0.5,
        }
    }
}

/// Source of terrain and vegetation data for arbitrary coordinates.
///
/// Implementations must be total: a location without data yields the
/// `Default` sample rather than an error.
pub trait TerrainProvider: Send + Sync {
    fn terrain_at(&self, lat: f64, lng: f64) -> TerrainSample;

    fn vegetation_at(&self, lat: f64, lng: f64) -> VegetationSample;
}

/// Deterministic synthetic terrain/vegetation table over a bounding box.
///
/// Samples sit on a lattice at `resolution` degrees, edges inclusive, stored
/// row-major (`[row * nx + col]`, row 0 = south, col 0 = west). A query that
/// does not land on a lattice point (to three decimal places) or falls outside
/// the box returns the default sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticTerrain {
    pub(crate) bounds: BoundingBox,
    pub(crate) resolution: f64,
    /// Number of samples west-east
    pub(crate) nx: usize,
    /// Number of samples south-north
    pub(crate) ny: usize,
    pub(crate) terrain: Vec<TerrainSample>,
    pub(crate) vegetation: Vec<VegetationSample>,
    pub(crate) min_elevation: f64,
    pub(crate) max_elevation: f64,
}

impl SyntheticTerrain {
    /// Coordinates closer than this to a lattice point resolve to it
    const KEY_TOLERANCE_DEG: f64 = 0.0005;

    /// Share of samples that become wetland forest
    const WETLAND_FRACTION: f64 = 0.2;

    /// Generate a table mimicking Pinelands topography: higher ground to the
    /// northwest, 0-15° slopes, pine on high ground and scattered wetlands.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidParameter`] for an invalid box, a
    /// non-positive resolution or a lattice larger than
    /// [`crate::GridConfig::MAX_CELLS`].
    pub fn generate(bounds: BoundingBox, resolution: f64, seed: u64) -> Result<Self> {
        let (nx, ny) = Self::checked_lattice(&bounds, resolution)?;
        Ok(Self::generate_lattice(bounds, resolution, nx, ny, seed))
    }

    /// Synthetic table for the default Pinelands bounds at 0.01°
    pub fn pinelands(seed: u64) -> Self {
        let bounds = BoundingBox::PINELANDS;
        let (nx, ny) = Self::lattice_size(&bounds, 0.01);
        Self::generate_lattice(bounds, 0.01, nx, ny, seed)
    }

    /// (nx, ny) sample counts, edges inclusive
    fn lattice_size(bounds: &BoundingBox, resolution: f64) -> (usize, usize) {
        (
            cells_to_cover(bounds.lng_span(), resolution).saturating_add(1),
            cells_to_cover(bounds.lat_span(), resolution).saturating_add(1),
        )
    }

    fn checked_lattice(bounds: &BoundingBox, resolution: f64) -> Result<(usize, usize)> {
        bounds.validate()?;
        ensure_positive("resolution", resolution)?;
        let (nx, ny) = Self::lattice_size(bounds, resolution);
        ensure_cell_count("resolution", ny, nx)?;
        Ok((nx, ny))
    }

    fn generate_lattice(bounds: BoundingBox, resolution: f64, nx: usize, ny: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut terrain = Vec::with_capacity(nx * ny);
        let mut min_elev = f64::MAX;
        let mut max_elev = f64::MIN;

        for iy in 0..ny {
            for ix in 0..nx {
                let lat = bounds.south + iy as f64 * resolution;
                let lng = bounds.west + ix as f64 * resolution;

                let base_elevation = 30.0;
                let nw_gradient = (bounds.north - lat) * 20.0 + (bounds.west - lng) * 15.0;
                let elev = (base_elevation + nw_gradient + rng.random::<f64>() * 5.0).max(0.0);

                terrain.push(TerrainSample {
                    elevation: Meters::new(elev),
                    slope: Degrees::new(rng.random::<f64>() * 15.0),
                });
                min_elev = min_elev.min(elev);
                max_elev = max_elev.max(elev);
            }
        }

        let vegetation = terrain
            .iter()
            .map(|sample| Self::synthesize_vegetation(&mut rng, *sample.elevation))
            .collect();

        SyntheticTerrain {
            bounds,
            resolution,
            nx,
            ny,
            terrain,
            vegetation,
            min_elevation: min_elev,
            max_elevation: max_elev,
        }
    }

    /// Table with the same sample at every lattice point
    ///
    /// # Errors
    ///
    /// Same conditions as [`SyntheticTerrain::generate`].
    pub fn uniform(
        bounds: BoundingBox,
        resolution: f64,
        terrain: TerrainSample,
        vegetation: VegetationSample,
    ) -> Result<Self> {
        let (nx, ny) = Self::checked_lattice(&bounds, resolution)?;

        Ok(SyntheticTerrain {
            bounds,
            resolution,
            nx,
            ny,
            terrain: vec![terrain; nx * ny],
            vegetation: vec![vegetation; nx * ny],
            min_elevation: *terrain.elevation,
            max_elevation: *terrain.elevation,
        })
    }

    fn synthesize_vegetation(rng: &mut StdRng, elevation: f64) -> VegetationSample {
        let is_wetland = rng.random::<f64>() < Self::WETLAND_FRACTION;

        let fuel_type = if is_wetland {
            FuelType::WetlandForest
        } else if elevation > 40.0 {
            if rng.random::<f64>() < 0.6 {
                FuelType::PitchPine
            } else {
                FuelType::MixedPineOak
            }
        } else {
            let r = rng.random::<f64>();
            if r < 0.4 {
                FuelType::MixedPineOak
            } else if r < 0.6 {
                FuelType::ScrubOak
            } else if r < 0.8 {
                FuelType::PitchPine
            } else {
                FuelType::ShortleafPine
            }
        };

        // Wetlands read greener
        let base_ndvi = if is_wetland { 0.7 } else { 0.5 };
        let ndvi = (base_ndvi + rng.random::<f64>() * 0.3).clamp(0.2, 0.9);
        let density = ndvi * 0.8 + rng.random::<f64>() * 0.2;

        VegetationSample {
            ndvi,
            fuel_type,
            density,
        }
    }

    /// Lattice index for a coordinate, if it names a sample
    fn index(&self, lat: f64, lng: f64) -> Option<usize> {
        let iy = Self::lattice_position(lat - self.bounds.south, self.resolution, self.ny)?;
        let ix = Self::lattice_position(lng - self.bounds.west, self.resolution, self.nx)?;
        Some(iy * self.nx + ix)
    }

    fn lattice_position(offset: f64, resolution: f64, len: usize) -> Option<usize> {
        let steps = offset / resolution;
        if !steps.is_finite() {
            return None;
        }
        let nearest = steps.round();
        if nearest < 0.0 || nearest >= len as f64 {
            return None;
        }
        if (steps - nearest).abs() * resolution > Self::KEY_TOLERANCE_DEG {
            return None;
        }
        Some(nearest as usize)
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Lattice size as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.ny, self.nx)
    }

    pub fn min_elevation(&self) -> f64 {
        self.min_elevation
    }

    pub fn max_elevation(&self) -> f64 {
        self.max_elevation
    }
}

impl TerrainProvider for SyntheticTerrain {
    fn terrain_at(&self, lat: f64, lng: f64) -> TerrainSample {
        self.index(lat, lng)
            .map_or_else(TerrainSample::default, |i| self.terrain[i])
    }

    fn vegetation_at(&self, lat: f64, lng: f64) -> VegetationSample {
        self.index(lat, lng)
            .map_or_else(VegetationSample::default, |i| self.vegetation[i])
    }
}
