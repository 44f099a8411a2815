use serde::{Deserialize, Serialize};

use crate::error::AcquireError;

/// Geographic point used for coordinate queries and air-pollution lookups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A user-specified location request, constructed once per user action.
///
/// Either a free-text city name or explicit coordinates. The same query shape
/// drives both the current-conditions and forecast fetches of an acquisition.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    City(String),
    Coordinates(Coordinates),
}

impl Query {
    pub fn city(name: impl Into<String>) -> Self {
        Query::City(name.into())
    }

    pub fn coordinates(lat: f64, lon: f64) -> Self {
        Query::Coordinates(Coordinates { lat, lon })
    }
}

/// Current conditions as resolved by the provider.
///
/// `name` is the provider's canonical name for the location, not necessarily
/// the user's input string; callers refreshing a query should prefer it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub visibility_m: u32,
    pub description: String,
    pub icon: String,
    pub coord: Coordinates,
}

/// One 3-hour-interval forecast entry, in provider order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Epoch seconds.
    pub dt: i64,
    pub temperature_c: f64,
    pub description: String,
}

/// Air-quality snapshot: provider AQI category plus PM2.5 concentration.
///
/// Absence means "unknown", never an error for the overall acquisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualitySample {
    /// Provider-claimed category, nominally 1–5. Kept as received so the
    /// presentation layer can absorb out-of-range values.
    pub aqi: i64,
    pub pm2_5: f64,
}

/// The consolidated result of one acquisition, delivered atomically.
#[derive(Debug, Clone)]
pub struct Acquisition {
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastPoint>,
    pub air_quality: Option<AirQualitySample>,
}

/// UI-facing acquisition state: one reducer target instead of independently
/// settable loading/result/error fields.
#[derive(Debug, Clone, Default)]
pub enum AcquisitionState {
    #[default]
    Idle,
    Loading,
    Success(Acquisition),
    Error(String),
}

impl AcquisitionState {
    /// Fold an orchestrator outcome into the state. A success clears any
    /// previous error; a failure replaces any previous result.
    pub fn settle(&mut self, outcome: Result<Acquisition, AcquireError>) {
        *self = match outcome {
            Ok(acq) => AcquisitionState::Success(acq),
            Err(e) => AcquisitionState::Error(e.to_string()),
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AcquisitionState::Loading)
    }
}
