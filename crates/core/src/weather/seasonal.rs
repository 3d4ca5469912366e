//! Monthly climate statistics for the Pine Barrens and the seasonal risk
//! derived from them

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

/// Long-run averages for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyConditions {
    /// 1 = January
    pub month: u32,
    /// mm
    pub rainfall: f64,
    /// °F
    pub temperature: f64,
    /// %
    pub humidity: f64,
    /// mph
    pub wind_speed: f64,
    /// 0-1 drought index
    pub drought: f64,
}

const fn month(
    month: u32,
    rainfall: f64,
    temperature: f64,
    humidity: f64,
    wind_speed: f64,
    drought: f64,
) -> MonthlyConditions {
    MonthlyConditions {
        month,
        rainfall,
        temperature,
        humidity,
        wind_speed,
        drought,
    }
}

static MONTHLY_CONDITIONS: [MonthlyConditions; 12] = [
    month(1, 88.9, 35.0, 65.0, 12.0, 0.3),
    month(2, 76.2, 38.0, 62.0, 13.0, 0.3),
    month(3, 101.6, 45.0, 60.0, 14.0, 0.4),
    month(4, 94.0, 55.0, 58.0, 13.0, 0.5),
    month(5, 96.5, 65.0, 65.0, 11.0, 0.6),
    month(6, 91.4, 74.0, 70.0, 10.0, 0.7),
    month(7, 116.8, 79.0, 72.0, 9.0, 0.8),
    month(8, 109.2, 77.0, 73.0, 9.0, 0.9),
    month(9, 94.0, 70.0, 71.0, 10.0, 0.7),
    month(10, 91.4, 59.0, 68.0, 11.0, 0.5),
    month(11, 88.9, 49.0, 66.0, 12.0, 0.4),
    month(12, 96.5, 38.0, 65.0, 12.0, 0.3),
];

/// Pine Barrens fire seasons by meteorological quarter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FireSeason {
    /// March to May, the peak season
    Spring,
    /// June to August
    Summer,
    /// September to November
    Fall,
    /// December to February
    Winter,
}

impl FireSeason {
    /// Season containing a calendar month (1-12)
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => FireSeason::Spring,
            6..=8 => FireSeason::Summer,
            9..=11 => FireSeason::Fall,
            _ => FireSeason::Winter,
        }
    }

    /// Multiplier applied to the base climate risk
    pub fn risk_multiplier(self) -> f64 {
        match self {
            FireSeason::Spring => 1.3,
            FireSeason::Summer => 1.2,
            FireSeason::Fall => 1.1,
            FireSeason::Winter => 0.8,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FireSeason::Spring => "Spring Fire Season",
            FireSeason::Summer => "Summer Fire Season",
            FireSeason::Fall => "Fall Fire Season",
            FireSeason::Winter => "Winter Season",
        }
    }
}

impl fmt::Display for FireSeason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Climate averages for the month containing `date`
pub fn conditions_for(date: NaiveDate) -> &'static MonthlyConditions {
    &MONTHLY_CONDITIONS[date.month0() as usize]
}

/// Seasonal fire risk in [0, 1] for the month containing `date`.
///
/// Five sub-risks weighted 0.2 each: temperature `(T - 32) / 100`, humidity
/// `(100 - H) / 100`, wind `W / 30`, rainfall `1 - R / 150` and the drought
/// index. The sum is scaled by the season multiplier and clamped.
pub fn seasonal_risk(date: NaiveDate) -> f64 {
    let c = conditions_for(date);

    let temperature_risk = (c.temperature - 32.0) / 100.0;
    let humidity_risk = (100.0 - c.humidity) / 100.0;
    let wind_risk = c.wind_speed / 30.0;
    let rainfall_risk = 1.0 - c.rainfall / 150.0;
    let drought_risk = c.drought;

    let base = (temperature_risk + humidity_risk + wind_risk + rainfall_risk + drought_risk) * 0.2;
    let season = FireSeason::from_month(c.month);

    (base * season.risk_multiplier()).clamp(0.0, 1.0)
}

pub fn current_fire_season(date: NaiveDate) -> FireSeason {
    FireSeason::from_month(date.month())
}

/// All twelve months, January first
pub fn seasonal_trends() -> &'static [MonthlyConditions] {
    &MONTHLY_CONDITIONS
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn first_of(month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, 1).unwrap()
    }

    #[test]
    fn test_every_month_in_bounds() {
        for m in 1..=12 {
            let risk = seasonal_risk(first_of(m));
            assert!((0.0..=1.0).contains(&risk), "month {m}: {risk}");
        }
    }

    #[test]
    fn test_january_value() {
        // (0.03 + 0.35 + 0.4 + (1 - 88.9/150) + 0.3) * 0.2 * 0.8
        let expected = (0.03 + 0.35 + 0.4 + (1.0 - 88.9 / 150.0) + 0.3) * 0.2 * 0.8;
        assert_relative_eq!(seasonal_risk(first_of(1)), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_spring_outranks_winter() {
        assert!(seasonal_risk(first_of(4)) > seasonal_risk(first_of(1)));
        assert!(seasonal_risk(first_of(4)) > seasonal_risk(first_of(12)));
    }

    #[test]
    fn test_season_labels() {
        let labels = [
            "Winter Season",
            "Winter Season",
            "Spring Fire Season",
            "Spring Fire Season",
            "Spring Fire Season",
            "Summer Fire Season",
            "Summer Fire Season",
            "Summer Fire Season",
            "Fall Fire Season",
            "Fall Fire Season",
            "Fall Fire Season",
            "Winter Season",
        ];
        for (m, label) in (1..=12).zip(labels) {
            assert_eq!(current_fire_season(first_of(m)).label(), label);
        }
        assert_eq!(FireSeason::Summer.to_string(), "Summer Fire Season");
    }

    #[test]
    fn test_trends_are_ordered() {
        let trends = seasonal_trends();
        assert_eq!(trends.len(), 12);
        for (i, row) in trends.iter().enumerate() {
            assert_eq!(row.month as usize, i + 1);
        }
        assert_eq!(conditions_for(first_of(8)).drought, 0.9);
    }
}
