//! Geographic primitives shared by the grid, the scorer and the simulator

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    /// Both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Planar offset to `other` in degrees, x = east (longitude), y = north (latitude)
    pub fn offset_to(&self, other: &GeoPoint) -> Vector2<f64> {
        Vector2::new(other.lng - self.lng, other.lat - self.lat)
    }

    /// Euclidean distance in degree space.
    ///
    /// No projection is applied, so one degree of longitude counts the same as
    /// one degree of latitude.
    pub fn degree_distance(&self, other: &GeoPoint) -> f64 {
        self.offset_to(other).norm()
    }

    /// Compass bearing to `other` in degrees (0 = north, 90 = east), in [0, 360)
    pub fn bearing_to(&self, other: &GeoPoint) -> f64 {
        let d = self.offset_to(other);
        d.x.atan2(d.y).to_degrees().rem_euclid(360.0)
    }
}

/// One weighted sample for a heatmap layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    pub lat: f64,
    pub lng: f64,
    pub weight: f64,
}

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// 16-point compass label for a bearing in degrees.
///
/// Any finite angle is accepted; it is wrapped into [0, 360) first and each
/// label covers 22.5°.
pub fn compass_point(degrees: f64) -> &'static str {
    let wrapped = degrees.rem_euclid(360.0);
    let index = (wrapped / 22.5).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = GeoPoint::new(39.80, -74.50);
        assert_relative_eq!(origin.bearing_to(&GeoPoint::new(39.81, -74.50)), 0.0, epsilon = 1e-9);
        assert_relative_eq!(origin.bearing_to(&GeoPoint::new(39.80, -74.49)), 90.0, epsilon = 1e-9);
        assert_relative_eq!(origin.bearing_to(&GeoPoint::new(39.79, -74.50)), 180.0, epsilon = 1e-9);
        assert_relative_eq!(origin.bearing_to(&GeoPoint::new(39.80, -74.51)), 270.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degree_distance() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.03, 0.04);
        assert_relative_eq!(a.degree_distance(&b), 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_compass_point() {
        assert_eq!(compass_point(0.0), "N");
        assert_eq!(compass_point(22.5), "NNE");
        assert_eq!(compass_point(90.0), "E");
        assert_eq!(compass_point(200.0), "SSW");
        assert_eq!(compass_point(359.0), "N");
        assert_eq!(compass_point(-90.0), "W");
        assert_eq!(compass_point(450.0), "E");
    }
}
