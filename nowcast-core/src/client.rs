use async_trait::async_trait;

use crate::error::CycleError;
use crate::model::{Coordinate, UnitSystem, WeatherSnapshot};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Seam over the weather HTTP API.
///
/// One invocation performs exactly one request and completes exactly
/// once, with either a snapshot or a failure. No retries.
#[async_trait]
pub trait WeatherClient: Send + Sync {
    async fn fetch(
        &self,
        coordinate: Coordinate,
        units: UnitSystem,
    ) -> Result<WeatherSnapshot, CycleError>;
}
