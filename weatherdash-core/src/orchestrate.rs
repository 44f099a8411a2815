use crate::{
    client::WeatherClient,
    error::{AcquireError, FetchError},
    model::{Acquisition, Coordinates, Query},
};

/// Source of the device position for the "use my location" path.
///
/// The platform's permission-gated geolocation API lives behind this seam;
/// `None` covers both denial and unavailability.
pub trait LocationSource {
    fn current_position(&self) -> Option<Coordinates>;
}

/// Sequences the three provider fetches for one query and applies the
/// failure policy: current and forecast are hard dependencies, air quality
/// degrades to unknown.
#[derive(Debug)]
pub struct Orchestrator<C: WeatherClient> {
    client: C,
}

impl<C: WeatherClient> Orchestrator<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Run one acquisition. The calls are causally sequential: air quality
    /// needs the coordinates resolved by the current-conditions response,
    /// and a forecast failure aborts the whole acquisition even though
    /// current conditions already succeeded.
    pub async fn acquire(&self, query: &Query) -> Result<Acquisition, AcquireError> {
        let current = self.client.fetch_current(query).await.map_err(|e| match (&e, query) {
            (FetchError::NotFound(name), Query::City(_)) => {
                AcquireError::CityNotFound(name.clone())
            }
            _ => AcquireError::Fetch(e.to_string()),
        })?;

        tracing::debug!(city = %current.name, "current conditions resolved");

        // Forecast reuses the original query, not the resolved name.
        let forecast = self
            .client
            .fetch_forecast(query)
            .await
            .map_err(|e| AcquireError::Fetch(e.to_string()))?;

        // Coordinates come from the resolved conditions, not the query.
        let air_quality = self
            .client
            .fetch_air_quality(current.coord.lat, current.coord.lon)
            .await;

        Ok(Acquisition { current, forecast, air_quality })
    }

    /// The geolocation variant: resolve a position first, then acquire by
    /// coordinates. Denial or unavailability short-circuits before any
    /// provider call.
    pub async fn acquire_here<L: LocationSource>(
        &self,
        locator: &L,
    ) -> Result<Acquisition, AcquireError> {
        let Some(position) = locator.current_position() else {
            return Err(AcquireError::LocationUnavailable);
        };

        self.acquire(&Query::Coordinates(position)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AirQualitySample, CurrentConditions, ForecastPoint};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn conditions(name: &str, lat: f64, lon: f64) -> CurrentConditions {
        CurrentConditions {
            name: name.to_string(),
            country: "IN".to_string(),
            temperature_c: 31.2,
            feels_like_c: 34.0,
            humidity_pct: 48,
            pressure_hpa: 1004,
            visibility_m: 3200,
            description: "haze".to_string(),
            icon: "50d".to_string(),
            coord: Coordinates { lat, lon },
        }
    }

    fn points(n: usize) -> Vec<ForecastPoint> {
        (0..n)
            .map(|i| ForecastPoint {
                dt: 1_700_000_000 + (i as i64) * 10_800,
                temperature_c: 20.0 + i as f64,
                description: "clear sky".to_string(),
            })
            .collect()
    }

    /// Scriptable client that counts every call.
    #[derive(Debug, Default)]
    struct StubClient {
        current_fails: Option<&'static str>,
        forecast_fails: bool,
        air_quality_fails: bool,
        current_calls: AtomicUsize,
        forecast_calls: AtomicUsize,
        air_quality_calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherClient for StubClient {
        async fn fetch_current(&self, query: &Query) -> Result<CurrentConditions, FetchError> {
            self.current_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(kind) = self.current_fails {
                return match (kind, query) {
                    ("not_found", Query::City(name)) => Err(FetchError::NotFound(name.clone())),
                    _ => Err(FetchError::Network("connection reset".to_string())),
                };
            }
            Ok(conditions("Delhi", 28.67, 77.22))
        }

        async fn fetch_forecast(&self, _query: &Query) -> Result<Vec<ForecastPoint>, FetchError> {
            self.forecast_calls.fetch_add(1, Ordering::SeqCst);
            if self.forecast_fails {
                return Err(FetchError::Network("connection reset".to_string()));
            }
            Ok(points(12))
        }

        async fn fetch_air_quality(&self, _lat: f64, _lon: f64) -> Option<AirQualitySample> {
            self.air_quality_calls.fetch_add(1, Ordering::SeqCst);
            if self.air_quality_fails {
                return None;
            }
            Some(AirQualitySample { aqi: 2, pm2_5: 20.0 })
        }
    }

    struct DeniedLocation;

    impl LocationSource for DeniedLocation {
        fn current_position(&self) -> Option<Coordinates> {
            None
        }
    }

    struct FixedLocation(Coordinates);

    impl LocationSource for FixedLocation {
        fn current_position(&self) -> Option<Coordinates> {
            Some(self.0)
        }
    }

    #[tokio::test]
    async fn current_failure_skips_forecast_and_air_quality() {
        let orch = Orchestrator::new(StubClient {
            current_fails: Some("not_found"),
            ..StubClient::default()
        });

        let err = orch.acquire(&Query::city("Nowhereville")).await.unwrap_err();
        assert!(matches!(err, AcquireError::CityNotFound(ref name) if name == "Nowhereville"));

        let client = &orch.client;
        assert_eq!(client.current_calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.forecast_calls.load(Ordering::SeqCst), 0);
        assert_eq!(client.air_quality_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn not_found_on_coordinates_is_a_generic_failure() {
        let orch = Orchestrator::new(StubClient {
            current_fails: Some("network"),
            ..StubClient::default()
        });

        let err = orch.acquire(&Query::coordinates(0.0, 0.0)).await.unwrap_err();
        assert!(matches!(err, AcquireError::Fetch(_)));
    }

    #[tokio::test]
    async fn forecast_failure_aborts_despite_current_success() {
        let orch = Orchestrator::new(StubClient {
            forecast_fails: true,
            ..StubClient::default()
        });

        let err = orch.acquire(&Query::city("Delhi")).await.unwrap_err();
        assert!(matches!(err, AcquireError::Fetch(_)));

        // Air quality is never attempted once the acquisition is aborted.
        assert_eq!(orch.client.air_quality_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn air_quality_failure_still_succeeds() {
        let orch = Orchestrator::new(StubClient {
            air_quality_fails: true,
            ..StubClient::default()
        });

        let acq = orch.acquire(&Query::city("Delhi")).await.expect("acquisition must succeed");
        assert!(acq.air_quality.is_none());
        assert_eq!(acq.forecast.len(), 12);
    }

    #[tokio::test]
    async fn success_carries_all_three_results() {
        let orch = Orchestrator::new(StubClient::default());

        let acq = orch.acquire(&Query::city("Delhi")).await.expect("acquisition must succeed");
        assert_eq!(acq.current.name, "Delhi");
        assert_eq!(acq.forecast.len(), 12);
        assert_eq!(acq.air_quality.expect("sample must be present").aqi, 2);
    }

    #[tokio::test]
    async fn denied_location_never_reaches_the_client() {
        let orch = Orchestrator::new(StubClient::default());

        let err = orch.acquire_here(&DeniedLocation).await.unwrap_err();
        assert!(matches!(err, AcquireError::LocationUnavailable));
        assert_eq!(err.to_string(), "location access denied or unavailable");

        let client = &orch.client;
        assert_eq!(client.current_calls.load(Ordering::SeqCst), 0);
        assert_eq!(client.forecast_calls.load(Ordering::SeqCst), 0);
        assert_eq!(client.air_quality_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn granted_location_acquires_by_coordinates() {
        let orch = Orchestrator::new(StubClient::default());
        let locator = FixedLocation(Coordinates { lat: 28.67, lon: 77.22 });

        let acq = orch.acquire_here(&locator).await.expect("acquisition must succeed");
        assert_eq!(acq.current.name, "Delhi");
    }
}
