use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::CycleError;
use crate::model::{Condition, Coordinate, UnitSystem, WeatherSnapshot};

use super::WeatherClient;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// OpenWeather current-weather client.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, CycleError> {
        Self::with_base_url(api_key, API_BASE_URL)
    }

    /// Client pointed at an alternative endpoint. Contract tests use
    /// this to aim at a local mock server.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, CycleError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CycleError::InvalidApiKey);
        }

        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            api_key,
            base_url: base_url.into(),
            http,
        })
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    async fn fetch(
        &self,
        coordinate: Coordinate,
        units: UnitSystem,
    ) -> Result<WeatherSnapshot, CycleError> {
        let url = format!("{}/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coordinate.latitude.to_string().as_str()),
                ("lon", coordinate.longitude.to_string().as_str()),
                ("units", units.as_query_value()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(CycleError::Api {
                status: status.as_u16(),
                message: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|e| CycleError::Api {
                status: status.as_u16(),
                message: format!("malformed body: {e}"),
            })?;

        debug!(city = %parsed.name, "parsed current weather response");

        Ok(parsed.into())
    }
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    visibility: f64,
}

impl From<OwCurrentResponse> for WeatherSnapshot {
    fn from(r: OwCurrentResponse) -> Self {
        WeatherSnapshot {
            city_name: r.name,
            country_code: r.sys.country,
            conditions: r
                .weather
                .into_iter()
                .map(|w| Condition {
                    description: w.description,
                    icon_code: w.icon,
                })
                .collect(),
            temp: r.main.temp,
            temp_min: r.main.temp_min,
            temp_max: r.main.temp_max,
            wind_speed_mph: r.wind.speed,
            pressure_hpa: r.main.pressure,
            humidity_pct: r.main.humidity,
            visibility_m: r.visibility,
            sunrise_unix: r.sys.sunrise,
            sunset_unix: r.sys.sunset,
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // Back off to a char boundary so multibyte text never splits.
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
