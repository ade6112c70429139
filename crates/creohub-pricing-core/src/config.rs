//! Pricing configuration

use std::path::PathBuf;
use std::time::Duration;

/// Default geolocation endpoint (ipapi.co response format)
pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipapi.co";

/// Pricing service configuration
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Base URL of the IP geolocation service
    pub geolocation_url: String,
    /// Upper bound on a single geolocation lookup
    pub geolocation_timeout: Duration,
    /// How long a resolved IP stays cached
    pub geolocation_cache_ttl: Duration,
    /// Maximum cached IPs
    pub geolocation_cache_capacity: u64,
    /// Optional JSON file replacing the built-in catalogs
    pub catalog_path: Option<PathBuf>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            geolocation_url: DEFAULT_GEOLOCATION_URL.to_string(),
            geolocation_timeout: Duration::from_secs(3),
            geolocation_cache_ttl: Duration::from_secs(60 * 60),
            geolocation_cache_capacity: 10_000,
            catalog_path: None,
        }
    }
}

impl PricingConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the geolocation base URL
    pub fn with_geolocation_url(mut self, url: impl Into<String>) -> Self {
        self.geolocation_url = url.into();
        self
    }

    /// Set the geolocation timeout
    pub fn with_geolocation_timeout(mut self, timeout: Duration) -> Self {
        self.geolocation_timeout = timeout;
        self
    }

    /// Load catalogs from a JSON file instead of the built-in defaults
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PricingConfig::default();
        assert_eq!(config.geolocation_url, "https://ipapi.co");
        assert_eq!(config.geolocation_timeout, Duration::from_secs(3));
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_builder() {
        let config = PricingConfig::new()
            .with_geolocation_url("http://localhost:9000")
            .with_geolocation_timeout(Duration::from_millis(250))
            .with_catalog_path("/etc/creohub/catalog.json");
        assert_eq!(config.geolocation_url, "http://localhost:9000");
        assert_eq!(config.geolocation_timeout, Duration::from_millis(250));
        assert_eq!(
            config.catalog_path.as_deref(),
            Some(std::path::Path::new("/etc/creohub/catalog.json"))
        );
    }
}
