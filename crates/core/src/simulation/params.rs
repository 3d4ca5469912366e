//! Fire-spread run parameters and their validation

use crate::config::SimulationConfig;
use crate::core_types::geo::GeoPoint;
use crate::core_types::units::{Degrees, MilesPerHour};
use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, Error, Result};
use serde::{Deserialize, Serialize};

/// Wind for the duration of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindConditions {
    pub speed: MilesPerHour,
    /// Compass direction the wind blows toward (0 = N, 90 = E)
    pub direction: Degrees,
}

impl WindConditions {
    pub fn new(speed: MilesPerHour, direction: Degrees) -> Self {
        WindConditions { speed, direction }
    }

    pub fn calm() -> Self {
        WindConditions {
            speed: MilesPerHour::CALM,
            direction: Degrees::new(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParameters {
    /// Must match a grid cell's southwest corner within the configured tolerance
    pub ignition_point: GeoPoint,
    pub wind_conditions: WindConditions,
    /// Hours
    pub duration: f64,
    /// Minutes per step
    pub time_step: f64,
}

impl SimulationParameters {
    /// Number of whole steps in the run: `floor(duration * 60 / time_step)`
    pub fn step_count(&self) -> usize {
        (self.duration * 60.0 / self.time_step).floor().max(0.0) as usize
    }

    /// Check every numeric input and return the step count.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] for a non-positive duration or time step,
    ///   negative wind speed, or non-finite coordinates/direction
    /// - [`Error::TooManySteps`] when the run exceeds `config.max_steps`
    pub fn validate(&self, config: &SimulationConfig) -> Result<usize> {
        ensure_positive("duration", self.duration)?;
        ensure_positive("time_step", self.time_step)?;
        ensure_non_negative("wind_conditions.speed", *self.wind_conditions.speed)?;
        ensure_finite("wind_conditions.direction", *self.wind_conditions.direction)?;
        ensure_finite("ignition_point.lat", self.ignition_point.lat)?;
        ensure_finite("ignition_point.lng", self.ignition_point.lng)?;

        let steps = self.step_count();
        if steps > config.max_steps {
            return Err(Error::TooManySteps {
                steps,
                max: config.max_steps,
            });
        }
        Ok(steps)
    }
}
