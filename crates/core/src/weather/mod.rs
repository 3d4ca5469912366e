//! Weather inputs to the risk scorer
//!
//! A [`WeatherReading`] is whatever the weather feed returned, with every
//! field optional. [`normalize_weather`] turns it into the 0-1 factors the
//! scorer consumes; [`WeatherReading::fire_risk`] is the standalone index
//! shown alongside current conditions.

pub mod seasonal;

use crate::core_types::units::{Degrees, Fahrenheit, MilesPerHour, Percent};
use crate::risk::scorer::RiskFactors;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use seasonal::{
    current_fire_season, seasonal_risk, seasonal_trends, FireSeason, MonthlyConditions,
};

/// Current conditions from a weather service
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    #[serde(default)]
    pub temperature: Option<Fahrenheit>,
    #[serde(default)]
    pub humidity: Option<Percent>,
    #[serde(default)]
    pub wind_speed: Option<MilesPerHour>,
    /// Direction the wind blows toward
    #[serde(default)]
    pub wind_direction: Option<Degrees>,
    /// Rainfall in inches over the reporting window
    #[serde(default)]
    pub precipitation: Option<f64>,
}

impl WeatherReading {
    /// Assumed temperature when the feed omits it
    pub const DEFAULT_TEMPERATURE_F: f64 = 70.0;
    /// Assumed relative humidity when the feed omits it
    pub const DEFAULT_HUMIDITY_PCT: f64 = 50.0;
    /// Assumed wind speed when the feed omits it
    pub const DEFAULT_WIND_MPH: f64 = 10.0;

    /// Wind speed normalizer: 30 mph and above counts as maximal
    const WIND_CEILING_MPH: f64 = 30.0;

    pub fn new(temperature: Fahrenheit, humidity: Percent, wind_speed: MilesPerHour) -> Self {
        WeatherReading {
            temperature: Some(temperature),
            humidity: Some(humidity),
            wind_speed: Some(wind_speed),
            wind_direction: None,
            precipitation: None,
        }
    }

    // Non-finite fields count as missing
    fn temperature_or_default(&self) -> f64 {
        finite_or(self.temperature.map(|t| *t), Self::DEFAULT_TEMPERATURE_F)
    }

    fn humidity_or_default(&self) -> f64 {
        finite_or(self.humidity.map(|h| *h), Self::DEFAULT_HUMIDITY_PCT)
    }

    fn wind_or_default(&self) -> f64 {
        finite_or(self.wind_speed.map(|w| *w), Self::DEFAULT_WIND_MPH)
    }

    fn precipitation_or_default(&self) -> f64 {
        finite_or(self.precipitation, 0.0)
    }

    /// Normalize into scorer factors.
    ///
    /// Temperature maps 0-100 °F onto 0-1, humidity is inverted, wind maps
    /// 0-30 mph onto 0-1. Seasonality comes from the monthly climate model for
    /// `date`; historical density is left at 0 for the scorer to fill in.
    /// Missing or non-finite fields take the `DEFAULT_*` values.
    pub fn normalize(&self, date: NaiveDate) -> RiskFactors {
        RiskFactors {
            temperature: (self.temperature_or_default() / 100.0).clamp(0.0, 1.0),
            humidity: 1.0 - (self.humidity_or_default() / 100.0).clamp(0.0, 1.0),
            wind_speed: (self.wind_or_default() / Self::WIND_CEILING_MPH).clamp(0.0, 1.0),
            seasonality: seasonal_risk(date),
            historical_density: 0.0,
        }
    }

    /// Instantaneous fire-weather index in [0, 1].
    ///
    /// Temperature scales 32-100 °F, humidity is inverted, wind scales to
    /// 30 mph and rainfall up to one inch suppresses risk. Weighted
    /// 0.3 / 0.3 / 0.25 / 0.15.
    pub fn fire_risk(&self) -> f64 {
        let temp_risk = ((self.temperature_or_default() - 32.0) / 68.0).clamp(0.0, 1.0);
        let humidity_risk = 1.0 - (self.humidity_or_default() / 100.0).clamp(0.0, 1.0);
        let wind_risk = (self.wind_or_default() / Self::WIND_CEILING_MPH).clamp(0.0, 1.0);
        let precip_risk = 1.0 - self.precipitation_or_default().clamp(0.0, 1.0);

        temp_risk * 0.3 + humidity_risk * 0.3 + wind_risk * 0.25 + precip_risk * 0.15
    }
}

fn finite_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(default)
}

/// Scorer factors for an optional reading.
///
/// Without a reading the scorer's standing assumptions
/// ([`RiskFactors::default`]) apply.
pub fn normalize_weather(reading: Option<&WeatherReading>, date: NaiveDate) -> RiskFactors {
    reading.map_or_else(RiskFactors::default, |reading| reading.normalize(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn july() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
    }

    #[test]
    fn test_normalize_full_reading() {
        let reading = WeatherReading::new(
            Fahrenheit::new(85.0),
            Percent::new(30.0),
            MilesPerHour::new(15.0),
        );
        let factors = reading.normalize(july());
        assert_relative_eq!(factors.temperature, 0.85);
        assert_relative_eq!(factors.humidity, 0.7);
        assert_relative_eq!(factors.wind_speed, 0.5);
        assert_relative_eq!(factors.seasonality, seasonal_risk(july()));
        assert_relative_eq!(factors.historical_density, 0.0);
    }

    #[test]
    fn test_normalize_fills_missing_fields() {
        let factors = WeatherReading::default().normalize(july());
        assert_relative_eq!(factors.temperature, 0.7);
        assert_relative_eq!(factors.humidity, 0.5);
        assert_relative_eq!(factors.wind_speed, 10.0 / 30.0);
    }

    #[test]
    fn test_normalize_clamps_extremes() {
        let reading = WeatherReading::new(
            Fahrenheit::new(112.0),
            Percent::new(0.0),
            MilesPerHour::new(45.0),
        );
        let factors = reading.normalize(july());
        assert_relative_eq!(factors.temperature, 1.0);
        assert_relative_eq!(factors.humidity, 1.0);
        assert_relative_eq!(factors.wind_speed, 1.0);
    }

    #[test]
    fn test_no_reading_uses_standing_assumptions() {
        let factors = normalize_weather(None, july());
        assert_eq!(factors, RiskFactors::default());
        assert_relative_eq!(factors.temperature, 0.75);
        assert_relative_eq!(factors.humidity, 0.5);
        assert_relative_eq!(factors.wind_speed, 10.0 / 30.0);
        assert_relative_eq!(factors.seasonality, 0.5);

        let reading = WeatherReading::default();
        assert_eq!(normalize_weather(Some(&reading), july()), reading.normalize(july()));
    }

    #[test]
    fn test_non_finite_fields_count_as_missing() {
        let reading = WeatherReading {
            temperature: Some(Fahrenheit::from(f64::NAN)),
            humidity: Some(Percent::from(f64::INFINITY)),
            wind_speed: Some(MilesPerHour::from(f64::NAN)),
            wind_direction: None,
            precipitation: Some(f64::NAN),
        };
        let factors = reading.normalize(july());
        assert_eq!(factors, WeatherReading::default().normalize(july()));
        assert!(factors.temperature.is_finite());

        let risk = reading.fire_risk();
        assert!(risk.is_finite());
        assert_relative_eq!(risk, WeatherReading::default().fire_risk());
    }

    #[test]
    fn test_fire_risk_weights() {
        let reading = WeatherReading {
            precipitation: Some(0.25),
            ..WeatherReading::new(Fahrenheit::new(66.0), Percent::new(40.0), MilesPerHour::new(12.0))
        };
        let expected = 0.5 * 0.3 + 0.6 * 0.3 + 0.4 * 0.25 + 0.75 * 0.15;
        assert_relative_eq!(reading.fire_risk(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_fire_risk_bounds() {
        let worst = WeatherReading::new(
            Fahrenheit::new(110.0),
            Percent::new(0.0),
            MilesPerHour::new(40.0),
        );
        assert_relative_eq!(worst.fire_risk(), 1.0);

        let soaked = WeatherReading {
            precipitation: Some(3.0),
            ..WeatherReading::new(Fahrenheit::new(20.0), Percent::new(100.0), MilesPerHour::CALM)
        };
        assert_relative_eq!(soaked.fire_risk(), 0.0);
    }
}
