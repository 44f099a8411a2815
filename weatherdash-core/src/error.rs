use thiserror::Error;

/// Failure of a single provider fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A name-based lookup resolved to nothing.
    #[error("location '{0}' not found")]
    NotFound(String),

    /// Transport failure, unexpected status, or unparseable body. The
    /// orchestrator treats all of these uniformly regardless of cause.
    #[error("network request failed: {0}")]
    Network(String),
}

/// Failure of a whole acquisition, surfaced to the presentation layer.
///
/// The `Display` strings are the user-visible messages; a "city not found"
/// is distinguished from generic fetch failure only when the failure came
/// from the current-conditions step of a name-based query.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("city not found: {0}")]
    CityNotFound(String),

    #[error("failed to fetch weather data: {0}")]
    Fetch(String),

    #[error("location access denied or unavailable")]
    LocationUnavailable,
}
