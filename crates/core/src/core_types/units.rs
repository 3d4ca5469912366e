//! Semantic unit types for the quantities that flow through the risk model
//!
//! The weather feed reports imperial units (°F, mph, inches of rain) while the
//! terrain model works in meters and degrees. Wrapping each in a newtype keeps
//! a wind speed from being passed where a humidity is expected.
//!
//! # Usage
//! ```
//! use pinelands_risk_core::core_types::units::{Fahrenheit, MilesPerHour, Percent};
//!
//! let temp = Fahrenheit::new(75.0);
//! assert!((*temp - 75.0).abs() < f64::EPSILON);
//!
//! let wind = MilesPerHour::new(12.0);
//! let humidity = Percent::new(45.0);
//! assert!(*wind > 10.0 && *humidity < 50.0);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Compare f64 values with total ordering so unit types can implement `Ord`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Air temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Fahrenheit(f64);

impl Eq for Fahrenheit {}

impl PartialOrd for Fahrenheit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fahrenheit {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Fahrenheit {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Fahrenheit {
    /// Absolute zero in Fahrenheit
    pub const ABSOLUTE_ZERO: Fahrenheit = Fahrenheit(-459.67);

    /// Water freezing point
    pub const FREEZING: Fahrenheit = Fahrenheit(32.0);

    /// Create a new temperature. Asserts value >= absolute zero (-459.67°F).
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(
            value >= Self::ABSOLUTE_ZERO.0,
            "Fahrenheit::new: value is below absolute zero (-459.67°F)"
        );
        Fahrenheit(value)
    }

    /// Convert to degrees Celsius
    #[inline]
    #[must_use]
    pub fn to_celsius(self) -> f64 {
        (self.0 - 32.0) * 5.0 / 9.0
    }
}

impl From<f64> for Fahrenheit {
    fn from(v: f64) -> Self {
        Fahrenheit(v)
    }
}

impl fmt::Display for Fahrenheit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}°F", self.0)
    }
}

// ============================================================================
// RELATIVE QUANTITIES
// ============================================================================

/// Percentage value (0-100), used for relative humidity and containment
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Percent(f64);

impl Eq for Percent {}

impl PartialOrd for Percent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Percent {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Percent {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Percent {
    /// Create a new percentage. Asserts 0 <= value <= 100.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(
            (0.0..=100.0).contains(&value),
            "Percent::new: value must be within 0-100"
        );
        Percent(value)
    }

    /// Convert to a 0-1 fraction
    #[inline]
    #[must_use]
    pub fn to_fraction(self) -> f64 {
        self.0 / 100.0
    }
}

impl From<f64> for Percent {
    fn from(v: f64) -> Self {
        Percent(v)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

// ============================================================================
// SPEED
// ============================================================================

/// Wind speed in miles per hour
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MilesPerHour(f64);

impl Eq for MilesPerHour {}

impl PartialOrd for MilesPerHour {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MilesPerHour {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for MilesPerHour {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl MilesPerHour {
    /// Calm air
    pub const CALM: MilesPerHour = MilesPerHour(0.0);

    /// Create a new wind speed. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(value >= 0.0, "MilesPerHour::new: negative speed is invalid");
        MilesPerHour(value)
    }

    /// Convert to km/h
    #[inline]
    #[must_use]
    pub fn to_kmh(self) -> f64 {
        self.0 * 1.609_344
    }
}

impl From<f64> for MilesPerHour {
    fn from(v: f64) -> Self {
        MilesPerHour(v)
    }
}

impl fmt::Display for MilesPerHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} mph", self.0)
    }
}

// ============================================================================
// SPATIAL
// ============================================================================

/// Elevation or distance in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Meters(f64);

impl Eq for Meters {}

impl PartialOrd for Meters {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Meters {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Meters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Meters {
    /// Create a new length in meters. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Meters::new: negative length is invalid");
        Meters(value)
    }
}

impl From<f64> for Meters {
    fn from(v: f64) -> Self {
        Meters(v)
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}m", self.0)
    }
}

/// Angle in degrees (slopes, bearings, wind directions)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Degrees(f64);

impl Eq for Degrees {}

impl PartialOrd for Degrees {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Degrees {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Degrees {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Degrees {
    /// Create a new angle. Any finite value is accepted.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(value.is_finite(), "Degrees::new: angle must be finite");
        Degrees(value)
    }

    /// Wrap the angle into [0, 360)
    #[inline]
    #[must_use]
    pub fn normalized(self) -> Degrees {
        Degrees(self.0.rem_euclid(360.0))
    }

    /// Convert to radians
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl From<f64> for Degrees {
    fn from(v: f64) -> Self {
        Degrees(v)
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fahrenheit_conversion() {
        assert_relative_eq!(Fahrenheit::new(212.0).to_celsius(), 100.0, epsilon = 1e-9);
        assert_relative_eq!(Fahrenheit::FREEZING.to_celsius(), 0.0, epsilon = 1e-9);
    }

    #[test]
    #[should_panic(expected = "below absolute zero")]
    fn test_fahrenheit_below_absolute_zero() {
        let _ = Fahrenheit::new(-500.0);
    }

    #[test]
    fn test_percent_fraction() {
        assert_relative_eq!(Percent::new(45.0).to_fraction(), 0.45);
    }

    #[test]
    #[should_panic(expected = "within 0-100")]
    fn test_percent_out_of_range() {
        let _ = Percent::new(120.0);
    }

    #[test]
    fn test_degrees_normalized() {
        assert_relative_eq!(*Degrees::new(-90.0).normalized(), 270.0);
        assert_relative_eq!(*Degrees::new(720.0).normalized(), 0.0);
    }

    #[test]
    fn test_ordering() {
        let calm = MilesPerHour::CALM;
        let breeze = MilesPerHour::new(8.0);
        assert_eq!(calm.max(breeze), breeze);
        assert!(Meters::new(10.0) < Meters::new(12.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(Fahrenheit::new(75.0).to_string(), "75°F");
        assert_eq!(MilesPerHour::new(10.0).to_string(), "10 mph");
        assert_eq!(Percent::new(50.0).to_string(), "50%");
    }
}
