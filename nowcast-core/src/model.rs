use serde::{Deserialize, Serialize};

use crate::error::CycleError;

/// One resolved geographic fix. Produced once per cycle, never reused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting values outside the valid lat/lon ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CycleError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(CycleError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Unit system passed through to the weather API as the `units` query value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_query_value(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

/// One condition entry from the API; a response may carry several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub description: String,
    pub icon_code: String,
}

/// Immutable parsed result of one weather fetch.
///
/// A fresh snapshot replaces the previous one wholesale each cycle;
/// nothing is merged and nothing outlives the cycle that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub city_name: String,
    pub country_code: String,
    pub conditions: Vec<Condition>,
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub wind_speed_mph: f64,
    pub pressure_hpa: f64,
    pub humidity_pct: f64,
    pub visibility_m: f64,
    pub sunrise_unix: i64,
    pub sunset_unix: i64,
}
