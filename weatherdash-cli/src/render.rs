//! Human-friendly dashboard output: current-conditions card, air-quality
//! card, forecast strip, and a small temperature chart.

use weatherdash_core::{
    Acquisition, AirQualitySample, ChartSeries, CurrentConditions, FORECAST_DISPLAY_SLOTS,
    aqi_color, aqi_label, build_chart_series, project_forecast_row,
};

const CHART_WIDTH: usize = 40;

pub fn dashboard(acq: &Acquisition) {
    current_card(&acq.current);
    air_quality_card(acq.air_quality.as_ref());
    forecast_strip(acq);
    chart(&build_chart_series(&acq.forecast));
}

fn current_card(cur: &CurrentConditions) {
    println!("{}, {} — {}", cur.name, cur.country, cur.description);
    println!("  {}°C  (icon {})", cur.temperature_c.round(), cur.icon);
    println!(
        "  feels like {}°C · humidity {}% · pressure {} hPa · visibility {} m",
        cur.feels_like_c.round(),
        cur.humidity_pct,
        cur.pressure_hpa,
        cur.visibility_m,
    );
    println!();
}

fn air_quality_card(sample: Option<&AirQualitySample>) {
    match sample {
        Some(s) => {
            let band = aqi_color(Some(s.pm2_5));
            println!(
                "Air quality: AQI {} · {}  (PM2.5 {} — {})",
                s.aqi,
                aqi_label(Some(s.aqi)),
                s.pm2_5.round(),
                band.as_hex(),
            );
        }
        None => println!("Air quality: {}", aqi_label(None)),
    }
    println!();
}

fn forecast_strip(acq: &Acquisition) {
    for point in acq.forecast.iter().take(FORECAST_DISPLAY_SLOTS) {
        let row = project_forecast_row(point);
        println!("  {:>2}h  {:>4}°  {}", row.time_label, row.temp_rounded, row.description);
    }
    println!();
}

fn chart(series: &ChartSeries) {
    let Some((min, max)) = bounds(&series.values) else {
        return;
    };
    let span = (max - min).max(1.0);

    for (label, value) in series.labels.iter().zip(&series.values) {
        let filled = (((value - min) / span) * CHART_WIDTH as f64).round() as usize;
        println!("  {label:>5} ┤{} {value:.1}°C", "▇".repeat(filled.max(1)));
    }
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    let first = values.first()?;
    let (mut min, mut max) = (*first, *first);
    for v in values {
        min = min.min(*v);
        max = max.max(*v);
    }
    Some((min, max))
}
