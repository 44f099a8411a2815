//! Pure presentation mapping: raw provider records in, display primitives
//! out. No I/O, no failure; absence comes in and goes out as sentinels.

use chrono::{DateTime, Local};

use crate::model::ForecastPoint;

/// Number of forecast rows the surface shows, out of the retained points.
pub const FORECAST_DISPLAY_SLOTS: usize = 8;

/// Display color band derived from the PM2.5 concentration.
///
/// Thresholds follow the standard PM2.5 breakpoints and must not be altered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiBand {
    Neutral,
    Teal,
    Blue,
    Amber,
    Orange,
    Red,
}

impl AqiBand {
    pub fn as_hex(&self) -> &'static str {
        match self {
            AqiBand::Neutral => "#fff",
            AqiBand::Teal => "#2dd4bf",
            AqiBand::Blue => "#60a5fa",
            AqiBand::Amber => "#f59e0b",
            AqiBand::Orange => "#f97316",
            AqiBand::Red => "#ef4444",
        }
    }
}

/// Human label for a provider AQI category.
///
/// Closed, ordered mapping; anything non-null that is not 1–4 falls through
/// to "Very Poor" to absorb out-of-range provider values.
pub fn aqi_label(category: Option<i64>) -> &'static str {
    match category {
        None => "N/A",
        Some(1) => "Good",
        Some(2) => "Fair",
        Some(3) => "Moderate",
        Some(4) => "Poor",
        Some(_) => "Very Poor",
    }
}

/// Color band for a PM2.5 concentration. Boundary values belong to the
/// lower band (exactly 12 is teal, exactly 35 is blue, and so on).
pub fn aqi_color(pm2_5: Option<f64>) -> AqiBand {
    let Some(pm) = pm2_5 else {
        return AqiBand::Neutral;
    };

    if pm <= 12.0 {
        AqiBand::Teal
    } else if pm <= 35.0 {
        AqiBand::Blue
    } else if pm <= 55.0 {
        AqiBand::Amber
    } else if pm <= 150.0 {
        AqiBand::Orange
    } else {
        AqiBand::Red
    }
}

/// Chart input: one label and one value per forecast point, same order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Shape the retained forecast into a temperature-over-time series.
/// No aggregation, no resampling.
pub fn build_chart_series(forecast: &[ForecastPoint]) -> ChartSeries {
    ChartSeries {
        labels: forecast.iter().map(|p| local_label(p.dt, "%H:%M", "--:--")).collect(),
        values: forecast.iter().map(|p| p.temperature_c).collect(),
    }
}

/// One slot of the forecast strip.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRow {
    pub time_label: String,
    pub temp_rounded: i32,
    pub description: String,
}

pub fn project_forecast_row(point: &ForecastPoint) -> ForecastRow {
    ForecastRow {
        time_label: local_label(point.dt, "%H", "--"),
        temp_rounded: point.temperature_c.round() as i32,
        description: point.description.clone(),
    }
}

fn local_label(epoch_secs: i64, format: &str, fallback: &str) -> String {
    DateTime::from_timestamp(epoch_secs, 0)
        .map(|utc| utc.with_timezone(&Local).format(format).to_string())
        .unwrap_or_else(|| fallback.to_string())
}
