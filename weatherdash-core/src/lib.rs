//! Core library for the `weatherdash` dashboard.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The OpenWeather client behind the [`client::WeatherClient`] seam
//! - The acquisition pipeline (current → forecast → air quality)
//! - Pure presentation mapping (AQI labels, color bands, chart series)
//!
//! It is used by `weatherdash-cli`, but can also back other surfaces.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod orchestrate;
pub mod present;

pub use client::{FORECAST_RETAIN, OpenWeatherClient, WeatherClient};
pub use config::Config;
pub use error::{AcquireError, FetchError};
pub use model::{
    Acquisition, AcquisitionState, AirQualitySample, Coordinates, CurrentConditions,
    ForecastPoint, Query,
};
pub use orchestrate::{LocationSource, Orchestrator};
pub use present::{
    AqiBand, ChartSeries, FORECAST_DISPLAY_SLOTS, ForecastRow, aqi_color, aqi_label,
    build_chart_series, project_forecast_row,
};
