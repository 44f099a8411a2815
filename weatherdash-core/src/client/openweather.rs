use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::{
    error::FetchError,
    model::{AirQualitySample, Coordinates, CurrentConditions, ForecastPoint, Query},
};

use super::{FORECAST_RETAIN, WeatherClient};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Client for the OpenWeather 2.5 REST API.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    /// Build a client. `timeout` of `None` keeps the transport default.
    pub fn new(api_key: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http })
    }

    /// Point the client at a different server. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json(&self, endpoint: &str, params: &[(String, String)]) -> Result<(StatusCode, String), FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("request to {endpoint} failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("reading {endpoint} response body failed: {e}")))?;

        Ok((status, body))
    }
}

fn location_params(query: &Query) -> Vec<(String, String)> {
    match query {
        Query::City(name) => vec![("q".to_string(), name.clone())],
        Query::Coordinates(c) => vec![
            ("lat".to_string(), c.lat.to_string()),
            ("lon".to_string(), c.lon.to_string()),
        ],
    }
}

/// Params for the two weather endpoints; the pollution endpoint takes no
/// units and gets plain coordinates instead.
fn weather_params(query: &Query) -> Vec<(String, String)> {
    let mut params = location_params(query);
    params.push(("units".to_string(), "metric".to_string()));
    params
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    async fn fetch_current(&self, query: &Query) -> Result<CurrentConditions, FetchError> {
        let (status, body) = self.get_json("weather", &weather_params(query)).await?;

        if status == StatusCode::NOT_FOUND {
            if let Query::City(name) = query {
                return Err(FetchError::NotFound(name.clone()));
            }
        }
        if !status.is_success() {
            return Err(FetchError::Network(format!(
                "current weather request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::Network(format!("parsing current weather JSON failed: {e}")))?;

        let (description, icon) = parsed
            .weather
            .first()
            .map(|w| (w.description.clone(), w.icon.clone()))
            .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

        Ok(CurrentConditions {
            name: parsed.name,
            country: parsed.sys.country,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            visibility_m: parsed.visibility,
            description,
            icon,
            coord: Coordinates { lat: parsed.coord.lat, lon: parsed.coord.lon },
        })
    }

    async fn fetch_forecast(&self, query: &Query) -> Result<Vec<ForecastPoint>, FetchError> {
        let (status, body) = self.get_json("forecast", &weather_params(query)).await?;

        if !status.is_success() {
            return Err(FetchError::Network(format!(
                "forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: OwForecastResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::Network(format!("parsing forecast JSON failed: {e}")))?;

        // Provider order, first FORECAST_RETAIN entries only.
        let points = parsed
            .list
            .into_iter()
            .take(FORECAST_RETAIN)
            .map(|e| {
                let description = e
                    .weather
                    .first()
                    .map(|w| w.description.clone())
                    .unwrap_or_else(|| "Unknown".to_string());
                ForecastPoint { dt: e.dt, temperature_c: e.main.temp, description }
            })
            .collect();

        Ok(points)
    }

    async fn fetch_air_quality(&self, lat: f64, lon: f64) -> Option<AirQualitySample> {
        let params = vec![("lat".to_string(), lat.to_string()), ("lon".to_string(), lon.to_string())];

        let (status, body) = match self.get_json("air_pollution", &params).await {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!(error = %e, "air quality fetch failed, degrading to unknown");
                return None;
            }
        };

        if !status.is_success() {
            tracing::warn!(%status, "air quality request rejected, degrading to unknown");
            return None;
        }

        let parsed: OwAirResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "air quality response unparseable, degrading to unknown");
                return None;
            }
        };

        // First entry is "current" per the pollution endpoint contract.
        parsed
            .list
            .into_iter()
            .next()
            .map(|entry| AirQualitySample { aqi: entry.main.aqi, pm2_5: entry.components.pm2_5 })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
    #[serde(default)]
    visibility: u32,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwAirMain {
    aqi: i64,
}

#[derive(Debug, Deserialize)]
struct OwAirComponents {
    pm2_5: f64,
}

#[derive(Debug, Deserialize)]
struct OwAirEntry {
    main: OwAirMain,
    components: OwAirComponents,
}

#[derive(Debug, Deserialize)]
struct OwAirResponse {
    list: Vec<OwAirEntry>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Error bodies can carry multi-byte characters (accented city names);
    // cut on a char boundary, never mid-character.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}
