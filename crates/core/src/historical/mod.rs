//! Historical wildfire records for the Pine Barrens
//!
//! The bundled dataset covers notable fires from 2020 to 2024. Records derive
//! `Deserialize` with camelCase keys so a replacement dataset can be loaded
//! from JSON and passed to the scorer in its place.

use crate::core_types::geo::GeoPoint;
use crate::core_types::units::{Fahrenheit, MilesPerHour, Percent};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Compile-time checked calendar date
macro_rules! date {
    ($y:literal, $m:literal, $d:literal) => {{
        const DATE: NaiveDate = match NaiveDate::from_ymd_opt($y, $m, $d) {
            Some(date) => date,
            None => panic!("invalid date literal"),
        };
        DATE
    }};
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireLocation {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
}

impl FireLocation {
    fn new(lat: f64, lng: f64) -> Self {
        FireLocation {
            lat,
            lng,
            municipality: None,
            county: None,
        }
    }

    fn in_burlington(lat: f64, lng: f64, municipality: &str) -> Self {
        Self::in_county(lat, lng, municipality, "Burlington")
    }

    fn in_county(lat: f64, lng: f64, municipality: &str, county: &str) -> Self {
        FireLocation {
            lat,
            lng,
            municipality: Some(municipality.to_owned()),
            county: Some(county.to_owned()),
        }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Structures affected by a fire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureImpact {
    pub threatened: u32,
    pub damaged: u32,
    pub destroyed: u32,
}

impl StructureImpact {
    fn threatened(count: u32) -> Self {
        StructureImpact {
            threatened: count,
            ..Default::default()
        }
    }
}

/// Conditions reported at the time of the fire. Every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireWeather {
    #[serde(default)]
    pub temperature: Option<Fahrenheit>,
    #[serde(default)]
    pub wind_speed: Option<MilesPerHour>,
    #[serde(default)]
    pub humidity: Option<Percent>,
    #[serde(default)]
    pub drought: Option<bool>,
}

impl FireWeather {
    fn observed(temperature: f64, wind_speed: f64, humidity: f64) -> Self {
        FireWeather {
            temperature: Some(Fahrenheit::new(temperature)),
            wind_speed: Some(MilesPerHour::new(wind_speed)),
            humidity: Some(Percent::new(humidity)),
            drought: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Containment {
    pub percentage: Percent,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evacuation {
    pub ordered: bool,
    /// People evacuated, when reported
    #[serde(default)]
    pub count: Option<u32>,
}

impl Evacuation {
    fn of(count: u32) -> Self {
        Evacuation {
            ordered: true,
            count: Some(count),
        }
    }
}

/// One historical wildfire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WildfireRecord {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub location: FireLocation,
    /// Burned area in acres
    pub size: f64,
    #[serde(default)]
    pub structures: StructureImpact,
    #[serde(default)]
    pub cause: Option<String>,
    #[serde(default)]
    pub weather_conditions: Option<FireWeather>,
    pub containment: Containment,
    #[serde(default)]
    pub evacuations: Evacuation,
}

impl WildfireRecord {
    /// Days from ignition to the recorded end date
    pub fn duration_days(&self) -> Option<i64> {
        self.end_date
            .map(|end| end.signed_duration_since(self.start_date).num_days())
    }
}

/// The bundled Pine Barrens fire history
pub fn pinelands_wildfires() -> Vec<WildfireRecord> {
    vec![
        WildfireRecord {
            id: "bass-river-2024".into(),
            name: "Bass River Fire".into(),
            start_date: date!(2024, 2, 15),
            end_date: Some(date!(2024, 2, 18)),
            location: FireLocation::in_burlington(39.6234, -74.4421, "Bass River Township"),
            size: 270.0,
            structures: StructureImpact::default(),
            cause: Some("Campfire".into()),
            weather_conditions: Some(FireWeather::observed(52.0, 18.0, 40.0)),
            containment: Containment {
                percentage: Percent::new(100.0),
                date: date!(2024, 2, 18),
            },
            evacuations: Evacuation::of(75),
        },
        WildfireRecord {
            id: "jimtown-2024".into(),
            name: "Jimtown Fire".into(),
            start_date: date!(2024, 3, 30),
            end_date: Some(date!(2024, 4, 2)),
            location: FireLocation::in_burlington(39.7245, -74.5768, "Shamong Township"),
            size: 180.0,
            structures: StructureImpact::default(),
            cause: Some("Under Investigation".into()),
            weather_conditions: Some(FireWeather::observed(65.0, 15.0, 45.0)),
            containment: Containment {
                percentage: Percent::new(100.0),
                date: date!(2024, 4, 2),
            },
            evacuations: Evacuation::default(),
        },
        WildfireRecord {
            id: "warren-grove-2023".into(),
            name: "Warren Grove Fire".into(),
            start_date: date!(2023, 8, 15),
            end_date: Some(date!(2023, 8, 20)),
            location: FireLocation::in_county(39.7450, -74.3823, "Little Egg Harbor Township", "Ocean"),
            size: 418.0,
            structures: StructureImpact::default(),
            cause: Some("Lightning Strike".into()),
            weather_conditions: Some(FireWeather::observed(88.0, 20.0, 35.0)),
            containment: Containment {
                percentage: Percent::new(100.0),
                date: date!(2023, 8, 20),
            },
            evacuations: Evacuation::of(150),
        },
        WildfireRecord {
            id: "mullica-2023".into(),
            name: "Mullica River Complex".into(),
            start_date: date!(2023, 6, 2),
            end_date: Some(date!(2023, 6, 8)),
            location: FireLocation::in_burlington(39.6789, -74.6543, "Washington Township"),
            size: 1200.0,
            structures: StructureImpact {
                threatened: 5,
                damaged: 0,
                destroyed: 2,
            },
            cause: Some("Lightning".into()),
            weather_conditions: Some(FireWeather::observed(85.0, 25.0, 30.0)),
            containment: Containment {
                percentage: Percent::new(100.0),
                date: date!(2023, 6, 8),
            },
            evacuations: Evacuation::of(250),
        },
        WildfireRecord {
            id: "wharton-2023".into(),
            name: "Wharton State Forest Fire".into(),
            start_date: date!(2023, 4, 12),
            end_date: Some(date!(2023, 4, 16)),
            location: FireLocation::in_burlington(39.7123, -74.5678, "Shamong Township"),
            size: 750.0,
            structures: StructureImpact::default(),
            cause: Some("Human Activity".into()),
            weather_conditions: Some(FireWeather::observed(68.0, 15.0, 45.0)),
            containment: Containment {
                percentage: Percent::new(100.0),
                date: date!(2023, 4, 15),
            },
            evacuations: Evacuation::default(),
        },
        WildfireRecord {
            id: "penn-2022".into(),
            name: "Penn State Forest Fire".into(),
            start_date: date!(2022, 9, 8),
            end_date: Some(date!(2022, 9, 12)),
            location: FireLocation::in_burlington(39.8234, -74.5289, "Washington Township"),
            size: 520.0,
            structures: StructureImpact::default(),
            cause: Some("Lightning Strike".into()),
            weather_conditions: Some(FireWeather::observed(82.0, 12.0, 55.0)),
            containment: Containment {
                percentage: Percent::new(100.0),
                date: date!(2022, 9, 12),
            },
            evacuations: Evacuation::of(100),
        },
        WildfireRecord {
            id: "brendan-byrne-2022".into(),
            name: "Brendan T. Byrne Fire".into(),
            start_date: date!(2022, 5, 2),
            end_date: Some(date!(2022, 5, 5)),
            location: FireLocation::in_burlington(39.8721, -74.5234, "Pemberton Township"),
            size: 315.0,
            structures: StructureImpact::default(),
            cause: Some("Prescribed Burn Escape".into()),
            weather_conditions: Some(FireWeather::observed(75.0, 20.0, 38.0)),
            containment: Containment {
                percentage: Percent::new(100.0),
                date: date!(2022, 5, 5),
            },
            evacuations: Evacuation::default(),
        },
        WildfireRecord {
            id: "tabernacle-2021".into(),
            name: "Tabernacle Fire".into(),
            start_date: date!(2021, 8, 18),
            end_date: Some(date!(2021, 8, 22)),
            location: FireLocation::in_burlington(39.8123, -74.6234, "Tabernacle Township"),
            size: 420.0,
            structures: StructureImpact::default(),
            cause: Some("Lightning".into()),
            weather_conditions: Some(FireWeather::observed(88.0, 15.0, 35.0)),
            containment: Containment {
                percentage: Percent::new(100.0),
                date: date!(2021, 8, 22),
            },
            evacuations: Evacuation::default(),
        },
        WildfireRecord {
            id: "chatsworth-2021".into(),
            name: "Chatsworth Complex".into(),
            start_date: date!(2021, 6, 12),
            end_date: Some(date!(2021, 6, 18)),
            location: FireLocation::in_burlington(39.7345, -74.5432, "Woodland Township"),
            size: 890.0,
            structures: StructureImpact {
                threatened: 5,
                damaged: 0,
                destroyed: 1,
            },
            cause: Some("Human Activity".into()),
            weather_conditions: Some(FireWeather::observed(82.0, 22.0, 42.0)),
            containment: Containment {
                percentage: Percent::new(100.0),
                date: date!(2021, 6, 18),
            },
            evacuations: Evacuation::of(150),
        },
        WildfireRecord {
            id: "franklin-parker-2020".into(),
            name: "Franklin Parker Preserve Fire".into(),
            start_date: date!(2020, 9, 8),
            end_date: Some(date!(2020, 9, 12)),
            location: FireLocation::in_burlington(39.7789, -74.5234, "Woodland Township"),
            size: 280.0,
            structures: StructureImpact::default(),
            cause: Some("Drought Lightning".into()),
            weather_conditions: Some(FireWeather::observed(78.0, 12.0, 48.0)),
            containment: Containment {
                percentage: Percent::new(100.0),
                date: date!(2020, 9, 12),
            },
            evacuations: Evacuation::default(),
        },
        WildfireRecord {
            id: "oswego-lake-2020".into(),
            name: "Oswego Lake Fire".into(),
            start_date: date!(2020, 5, 15),
            end_date: Some(date!(2020, 5, 19)),
            location: FireLocation::in_burlington(39.7234, -74.4987, "Washington Township"),
            size: 620.0,
            structures: StructureImpact::default(),
            cause: Some("Human Activity".into()),
            weather_conditions: Some(FireWeather::observed(72.0, 18.0, 52.0)),
            containment: Containment {
                percentage: Percent::new(100.0),
                date: date!(2020, 5, 19),
            },
            evacuations: Evacuation::of(85),
        },
        WildfireRecord {
            id: "jackson-road-2024".into(),
            name: "Jackson Road Wildfire".into(),
            start_date: date!(2024, 4, 24),
            end_date: Some(date!(2024, 4, 25)),
            location: FireLocation::new(39.7234, -74.7812),
            size: 510.0,
            structures: StructureImpact::default(),
            cause: Some("Under investigation".into()),
            weather_conditions: Some(FireWeather {
                drought: Some(false),
                ..Default::default()
            }),
            containment: Containment {
                percentage: Percent::new(100.0),
                date: date!(2024, 4, 25),
            },
            evacuations: Evacuation::default(),
        },
        WildfireRecord {
            id: "tea-time-hill-2024".into(),
            name: "Tea Time Hill Wildfire".into(),
            start_date: date!(2024, 7, 4),
            end_date: Some(date!(2024, 7, 10)),
            location: FireLocation::new(39.7856, -74.6234),
            size: 4300.0,
            structures: StructureImpact::threatened(2),
            cause: Some("Human – illegal fireworks".into()),
            weather_conditions: Some(FireWeather {
                temperature: Some(Fahrenheit::new(105.0)),
                ..Default::default()
            }),
            containment: Containment {
                percentage: Percent::new(90.0),
                date: date!(2024, 7, 8),
            },
            evacuations: Evacuation {
                ordered: true,
                count: None,
            },
        },
        WildfireRecord {
            id: "shotgun-2024".into(),
            name: "Shotgun Wildfire".into(),
            start_date: date!(2024, 11, 6),
            end_date: Some(date!(2024, 11, 11)),
            location: FireLocation::new(40.0845, -74.3567),
            size: 350.0,
            structures: StructureImpact::threatened(25),
            cause: Some("Under investigation (suspected human cause)".into()),
            weather_conditions: Some(FireWeather {
                humidity: Some(Percent::new(20.0)),
                wind_speed: Some(MilesPerHour::new(30.0)),
                drought: Some(true),
                ..Default::default()
            }),
            containment: Containment {
                percentage: Percent::new(90.0),
                date: date!(2024, 11, 8),
            },
            evacuations: Evacuation::of(25),
        },
        WildfireRecord {
            id: "bethany-run-2024".into(),
            name: "Bethany Run Wildfire".into(),
            start_date: date!(2024, 11, 7),
            end_date: Some(date!(2024, 11, 10)),
            location: FireLocation::new(39.8567, -74.9234),
            size: 360.0,
            structures: StructureImpact::threatened(104),
            cause: Some("Under investigation".into()),
            weather_conditions: Some(FireWeather {
                wind_speed: Some(MilesPerHour::new(25.0)),
                drought: Some(true),
                ..Default::default()
            }),
            containment: Containment {
                percentage: Percent::new(90.0),
                date: date!(2024, 11, 9),
            },
            evacuations: Evacuation::of(100),
        },
        WildfireRecord {
            id: "pheasant-run-2024".into(),
            name: "Pheasant Run Wildfire".into(),
            start_date: date!(2024, 11, 7),
            end_date: Some(date!(2024, 11, 12)),
            location: FireLocation::new(39.6789, -75.0123),
            size: 133.0,
            structures: StructureImpact::default(),
            cause: Some("Under investigation".into()),
            weather_conditions: Some(FireWeather {
                drought: Some(true),
                ..Default::default()
            }),
            containment: Containment {
                percentage: Percent::new(75.0),
                date: date!(2024, 11, 9),
            },
            evacuations: Evacuation::default(),
        },
    ]
}
