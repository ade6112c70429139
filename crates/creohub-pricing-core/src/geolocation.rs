//! IP geolocation
//!
//! Best-effort country lookup used as one signal in currency detection.
//! Every failure is reported as `GeolocationUnavailable`; callers treat it
//! as an absent signal.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use serde::Deserialize;

use crate::{PricingConfig, PricingError};

/// Result of a successful lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoLocation {
    /// ISO 3166-1 alpha-2 country code, upper-case
    pub country_code: String,
}

/// IP-to-country lookup
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// Resolve the country of `ip`
    async fn locate(&self, ip: IpAddr) -> Result<GeoLocation, PricingError>;
}

/// ipapi.co response (also returned by compatible self-hosted services)
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    country_code: Option<String>,
    #[serde(default)]
    error: bool,
    #[serde(default)]
    reason: Option<String>,
}

/// Geolocation client for ipapi.co-compatible endpoints
///
/// Successful lookups are cached per IP; failures are not, so a transient
/// outage does not pin a visitor to the fallback currency.
#[derive(Clone)]
pub struct IpApiLocator {
    http_client: reqwest::Client,
    base_url: String,
    cache: Cache<IpAddr, GeoLocation>,
}

impl IpApiLocator {
    /// Create a locator from pricing configuration
    ///
    /// # Errors
    /// Returns `PricingError::HttpClient` if the bounded client cannot be built.
    pub fn new(config: &PricingConfig) -> Result<Self, PricingError> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(config.geolocation_timeout)
            .timeout(config.geolocation_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent("creohub-pricing")
            .build()?;

        Ok(Self::with_client(config, http_client))
    }

    /// Create with a custom HTTP client
    pub fn with_client(config: &PricingConfig, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            base_url: config.geolocation_url.trim_end_matches('/').to_string(),
            cache: Cache::builder()
                .time_to_live(config.geolocation_cache_ttl)
                .max_capacity(config.geolocation_cache_capacity)
                .build(),
        }
    }

    async fn fetch(&self, ip: IpAddr) -> Result<GeoLocation, PricingError> {
        let url = format!("{}/{ip}/json/", self.base_url);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::debug!("Geolocation request failed: {}", e);
            PricingError::GeolocationUnavailable(e.to_string())
        })?;

        if !response.status().is_success() {
            tracing::debug!("Geolocation returned status: {}", response.status());
            return Err(PricingError::GeolocationUnavailable(format!(
                "status {}",
                response.status()
            )));
        }

        let body: IpApiResponse = response.json().await.map_err(|e| {
            tracing::debug!("Failed to parse geolocation response: {}", e);
            PricingError::GeolocationUnavailable(e.to_string())
        })?;

        if body.error {
            let reason = body.reason.unwrap_or_else(|| "unknown".to_string());
            tracing::debug!(reason = %reason, "Geolocation service reported an error");
            return Err(PricingError::GeolocationUnavailable(reason));
        }

        match body.country_code {
            Some(cc) if cc.len() == 2 && cc.chars().all(|c| c.is_ascii_alphabetic()) => Ok(GeoLocation {
                country_code: cc.to_ascii_uppercase(),
            }),
            other => Err(PricingError::GeolocationUnavailable(format!(
                "malformed country code {other:?}"
            ))),
        }
    }
}

#[async_trait]
impl GeoLocator for IpApiLocator {
    async fn locate(&self, ip: IpAddr) -> Result<GeoLocation, PricingError> {
        if !is_public(ip) {
            return Err(PricingError::GeolocationUnavailable(format!("{ip} is not a public address")));
        }

        if let Some(hit) = self.cache.get(&ip).await {
            return Ok(hit);
        }

        let location = self.fetch(ip).await?;
        self.cache.insert(ip, location.clone()).await;
        Ok(location)
    }
}

impl std::fmt::Debug for IpApiLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IpApiLocator")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Whether an address can be meaningfully geolocated
fn is_public(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            !(v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
                || v4.is_documentation())
        }
        IpAddr::V6(v6) => {
            if let Some(mapped) = v6.to_ipv4_mapped() {
                return is_public(IpAddr::V4(mapped));
            }
            let first = v6.segments()[0];
            !(v6.is_loopback()
                || v6.is_unspecified()
                // fc00::/7 unique local
                || (first & 0xfe00) == 0xfc00
                // fe80::/10 link local
                || (first & 0xffc0) == 0xfe80)
        }
    }
}
