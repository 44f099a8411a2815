use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::FetchError,
    model::{AirQualitySample, CurrentConditions, ForecastPoint, Query},
};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Number of forecast entries retained after acquisition. The provider
/// returns 3-hour-interval points; everything past the first 12 is dropped.
pub const FORECAST_RETAIN: usize = 12;

/// The three provider fetches an acquisition is built from.
///
/// Implementations issue independent network calls with no caching,
/// deduplication, or retry.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    /// Current conditions by city name or coordinates. A name that resolves
    /// to nothing is `NotFound`; everything else that goes wrong is
    /// `Network`.
    async fn fetch_current(&self, query: &Query) -> Result<CurrentConditions, FetchError>;

    /// Short-term forecast, requested with the same query shape as
    /// `fetch_current` for this acquisition, never the resolved name.
    /// At most [`FORECAST_RETAIN`] points, in provider order.
    async fn fetch_forecast(&self, query: &Query) -> Result<Vec<ForecastPoint>, FetchError>;

    /// Air quality by coordinates (the pollution endpoint has no name-based
    /// form). Total: any transport or parse failure degrades to `None`.
    async fn fetch_air_quality(&self, lat: f64, lon: f64) -> Option<AirQualitySample>;
}
