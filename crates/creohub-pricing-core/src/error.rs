//! Pricing errors

use thiserror::Error;

/// Pricing errors
///
/// Only catalog loading surfaces to callers. Geolocation failures are
/// absorbed by the service and turned into an absent signal.
#[derive(Error, Debug)]
pub enum PricingError {
    /// Geolocation lookup failed (network, timeout, malformed response)
    #[error("geolocation unavailable: {0}")]
    GeolocationUnavailable(String),

    /// Geolocation HTTP client could not be built
    #[error("failed to build geolocation client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Catalog data is inconsistent
    #[error("invalid catalog: {0}")]
    Catalog(String),

    /// Catalog file could not be read
    #[error("failed to read catalog: {0}")]
    CatalogIo(#[from] std::io::Error),

    /// Catalog file is not valid JSON for the expected shape
    #[error("failed to parse catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),
}
