//! Creohub Pricing Core - Currency and plan business logic
//!
//! Display-currency resolution (stored preference, IP geolocation, browser
//! locale), amount formatting and conversion, and subscription-plan
//! entitlements evaluated against an immutable in-process catalog.
//!
//! # Example
//!
//! ```rust,ignore
//! use creohub_pricing_core::{PricingConfig, PricingService};
//!
//! let pricing = PricingService::from_config(&PricingConfig::default())?;
//!
//! let currency = pricing.detect_for_ip(Some(ip), Some("en-KE")).await;
//! let label = pricing.format_currency(1234.5, currency.as_str()); // "KSh 1,234.50"
//!
//! if !pricing.can_add_product(product_count, "free") {
//!     // prompt upgrade
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod currency;
pub mod entitlement;
pub mod error;
pub mod geolocation;
pub mod rates;
pub mod service;

pub use catalog::{Catalogs, CurrencyCatalog, PlanCatalog};
pub use config::PricingConfig;
pub use currency::{format_amount, region_from_locale};
pub use entitlement::{is_subscription_active_at, is_trial_expired_at, round_to_cents};
pub use error::PricingError;
pub use geolocation::{GeoLocation, GeoLocator, IpApiLocator};
pub use rates::{ExchangeRateProvider, StaticRateTable};
pub use service::PricingService;
