//! Configuration for the Creohub API service.

use std::time::Duration;

use creohub_auth_core::SessionConfig;
use creohub_pricing_core::PricingConfig;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT`
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }

    /// Anything other than `json` is pretty
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Database URL
    pub database_url: String,

    /// Session lifetime, idle warning, and cleanup cadence
    pub session: SessionConfig,

    /// Catalog source and geolocation client settings
    pub pricing: PricingConfig,

    /// Per-request timeout (health routes are exempt)
    pub request_timeout: Duration,

    /// Log output format
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Database
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let http_port = parse_env("HTTP_PORT", 8080u16)?;

        // Sessions
        let timeout_minutes: u64 = parse_env("SESSION_TIMEOUT_MINUTES", 30)?;
        let warning_lead_minutes: u64 = parse_env("SESSION_WARNING_LEAD_MINUTES", 5)?;
        let cleanup_interval_secs: u64 = parse_env("SESSION_CLEANUP_INTERVAL_SECS", 900)?;

        let session = SessionConfig::new()
            .with_timeout(Duration::from_secs(timeout_minutes * 60))
            .with_warning_lead(Duration::from_secs(warning_lead_minutes * 60))
            .with_cleanup_interval(Duration::from_secs(cleanup_interval_secs));
        session
            .validate()
            .map_err(|e| ConfigError::Session(e.to_string()))?;

        // Pricing
        let mut pricing = PricingConfig::new();
        if let Ok(url) = std::env::var("GEOLOCATION_URL") {
            pricing = pricing.with_geolocation_url(url);
        }
        let geolocation_timeout_ms: u64 = parse_env("GEOLOCATION_TIMEOUT_MS", 3000)?;
        pricing = pricing.with_geolocation_timeout(Duration::from_millis(geolocation_timeout_ms));
        if let Ok(path) = std::env::var("PRICING_CATALOG_PATH") {
            if !path.trim().is_empty() {
                pricing = pricing.with_catalog_path(path);
            }
        }

        let request_timeout_secs: u64 = parse_env("REQUEST_TIMEOUT_SECS", 30)?;

        Ok(Self {
            http_port,
            database_url,
            session,
            pricing,
            request_timeout: Duration::from_secs(request_timeout_secs),
            log_format: LogFormat::from_env(),
        })
    }
}

fn parse_env<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Session config error: {0}")]
    Session(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some(" JSON ")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("pretty")), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(None), LogFormat::Pretty);
    }
}
