//! Error type for configuration problems the caller must fix
//!
//! Missing lookup data, unknown fuel types and out-of-bounds fire records are
//! resolved locally with documented fallbacks and never surface here. Only
//! inputs that make a computation meaningless are rejected.

use thiserror::Error;

/// Errors returned by grid construction and fire-spread simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A numeric parameter was non-finite or outside its valid range
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// No grid cell lies within tolerance of the requested ignition point
    #[error("Ignition point ({lat:.4}, {lng:.4}) does not match any grid cell")]
    IgnitionOutsideGrid { lat: f64, lng: f64 },

    /// The requested duration/time step would run more steps than allowed
    #[error("Simulation would run {steps} steps, maximum is {max}")]
    TooManySteps { steps: usize, max: usize },

    /// The grid has no cells to simulate over
    #[error("Risk grid has no cells")]
    EmptyGrid,

    /// The caller cancelled the run between steps
    #[error("Simulation cancelled after {step} steps")]
    Cancelled { step: usize },
}

impl Error {
    /// Error for a parameter that must be finite and strictly positive
    pub fn not_positive(name: &'static str, value: f64) -> Self {
        Error::InvalidParameter {
            name,
            message: format!("must be finite and positive, got {value}"),
        }
    }

    /// Error for a parameter that must be finite and non-negative
    pub fn negative(name: &'static str, value: f64) -> Self {
        Error::InvalidParameter {
            name,
            message: format!("must be finite and non-negative, got {value}"),
        }
    }

    /// Error for a parameter that must be a finite number
    pub fn not_finite(name: &'static str, value: f64) -> Self {
        Error::InvalidParameter {
            name,
            message: format!("must be finite, got {value}"),
        }
    }
}

/// Check that `value` is finite and > 0
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::not_positive(name, value))
    }
}

/// Check that `value` is finite and >= 0
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::negative(name, value))
    }
}

/// Check that `value` is finite
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::not_finite(name, value))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::not_positive("duration", -1.0);
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'duration': must be finite and positive, got -1"
        );

        let err = Error::TooManySteps { steps: 20_000, max: 10_000 };
        assert_eq!(err.to_string(), "Simulation would run 20000 steps, maximum is 10000");
    }

    #[test]
    fn test_ensure_helpers() {
        assert_eq!(ensure_positive("x", 2.0), Ok(2.0));
        assert!(ensure_positive("x", 0.0).is_err());
        assert!(ensure_positive("x", f64::NAN).is_err());
        assert_eq!(ensure_non_negative("x", 0.0), Ok(0.0));
        assert!(ensure_non_negative("x", -0.5).is_err());
        assert!(ensure_finite("x", f64::INFINITY).is_err());
        assert_eq!(ensure_finite("x", -3.0), Ok(-3.0));
    }
}
