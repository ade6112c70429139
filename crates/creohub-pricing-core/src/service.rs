//! Pricing service

use std::net::IpAddr;
use std::sync::Arc;

use chrono::Utc;
use creohub_types::{
    CurrencyCode, EntitlementCheck, PlanEntitlements, PricingPlan, SubscriptionState,
    SupportedCurrency,
};

use crate::catalog::{Catalogs, CurrencyCatalog, PlanCatalog};
use crate::currency::{format_amount, region_from_locale};
use crate::entitlement::{
    is_subscription_active_at, is_trial_expired_at, product_limit_check, transaction_fee,
};
use crate::geolocation::{GeoLocator, IpApiLocator};
use crate::rates::ExchangeRateProvider;
use crate::{PricingConfig, PricingError};

/// Pricing and currency resolver
///
/// Catalog reads are lock-free; the only I/O is the optional geolocation
/// lookup in [`PricingService::detect_for_ip`].
#[derive(Clone)]
pub struct PricingService {
    currencies: Arc<CurrencyCatalog>,
    plans: Arc<PlanCatalog>,
    rates: Arc<dyn ExchangeRateProvider>,
    geo: Arc<dyn GeoLocator>,
}

impl PricingService {
    /// Create a service from catalogs and a geolocation backend
    ///
    /// The catalog's rate table is used for conversions.
    pub fn new(catalogs: Catalogs, geo: Arc<dyn GeoLocator>) -> Self {
        Self {
            currencies: Arc::new(catalogs.currencies),
            plans: Arc::new(catalogs.plans),
            rates: Arc::new(catalogs.rates),
            geo,
        }
    }

    /// Build from configuration: catalog file (or built-ins) plus ipapi.co lookups
    pub fn from_config(config: &PricingConfig) -> Result<Self, PricingError> {
        let catalogs = match &config.catalog_path {
            Some(path) => Catalogs::load(path)?,
            None => Catalogs::builtin(),
        };
        Ok(Self::new(catalogs, Arc::new(IpApiLocator::new(config)?)))
    }

    /// Replace the exchange-rate source
    pub fn with_rates(mut self, rates: Arc<dyn ExchangeRateProvider>) -> Self {
        self.rates = rates;
        self
    }

    // =========================================================================
    // Catalogs
    // =========================================================================

    /// Supported currencies in catalog order
    pub fn currencies(&self) -> impl Iterator<Item = &SupportedCurrency> {
        self.currencies.iter()
    }

    /// Look up a supported currency
    pub fn get_currency(&self, code: &str) -> Option<&SupportedCurrency> {
        self.currencies.get(code)
    }

    /// Plans in catalog order
    pub fn plans(&self) -> impl Iterator<Item = &PricingPlan> {
        self.plans.iter()
    }

    /// Look up a plan
    pub fn get_plan(&self, plan_id: &str) -> Option<&PricingPlan> {
        self.plans.get(plan_id)
    }

    // =========================================================================
    // Currency Detection
    // =========================================================================

    /// Pick a display currency from the geolocated country and the browser
    /// locale, in that order, defaulting to USD.
    pub fn detect_currency(&self, geo_country: Option<&str>, browser_locale: Option<&str>) -> CurrencyCode {
        if let Some(currency) = geo_country.and_then(|cc| self.currencies.for_country(cc)) {
            return currency.code.clone();
        }

        let from_locale = browser_locale
            .and_then(region_from_locale)
            .and_then(|region| self.currencies.for_country(&region));
        if let Some(currency) = from_locale {
            return currency.code.clone();
        }

        CurrencyCode::default_currency()
    }

    /// Like [`detect_currency`](Self::detect_currency), but a stored
    /// preference naming a supported currency wins.
    pub fn resolve_currency(
        &self,
        preference: Option<&str>,
        geo_country: Option<&str>,
        browser_locale: Option<&str>,
    ) -> CurrencyCode {
        if let Some(currency) = preference.and_then(|p| self.currencies.get(p)) {
            return currency.code.clone();
        }
        self.detect_currency(geo_country, browser_locale)
    }

    /// Geolocate `ip` and detect the currency. Lookup failures fall through
    /// to the locale signal.
    pub async fn detect_for_ip(&self, ip: Option<IpAddr>, browser_locale: Option<&str>) -> CurrencyCode {
        let country = match ip {
            Some(ip) => match self.geo.locate(ip).await {
                Ok(location) => Some(location.country_code),
                Err(e) => {
                    tracing::debug!("Geolocation skipped: {}", e);
                    None
                }
            },
            None => None,
        };

        self.detect_currency(country.as_deref(), browser_locale)
    }

    /// Stored preference if supported, otherwise [`detect_for_ip`](Self::detect_for_ip)
    pub async fn resolve_for_ip(
        &self,
        preference: Option<&str>,
        ip: Option<IpAddr>,
        browser_locale: Option<&str>,
    ) -> CurrencyCode {
        if let Some(currency) = preference.and_then(|p| self.currencies.get(p)) {
            return currency.code.clone();
        }
        self.detect_for_ip(ip, browser_locale).await
    }

    // =========================================================================
    // Formatting and Conversion
    // =========================================================================

    /// Render an amount for display; never fails
    pub fn format_currency(&self, amount: f64, code: &str) -> String {
        format_amount(amount, code, self.currencies.get(code))
    }

    /// Convert between currencies. Unknown codes return the amount unchanged.
    pub fn convert_currency(&self, amount: f64, from: &str, to: &str) -> f64 {
        if from.trim().eq_ignore_ascii_case(to.trim()) {
            return amount;
        }

        let (Ok(from_code), Ok(to_code)) = (CurrencyCode::parse(from), CurrencyCode::parse(to)) else {
            tracing::warn!(from, to, "Conversion requested for malformed currency code");
            return amount;
        };

        match self.rates.convert(amount, &from_code, &to_code) {
            Some(converted) => converted,
            None => {
                tracing::warn!(%from_code, %to_code, "No exchange rate, returning amount unconverted");
                amount
            }
        }
    }

    // =========================================================================
    // Entitlements
    // =========================================================================

    /// Platform fee on a sale, rounded to cents; zero for unknown plans
    pub fn calculate_transaction_fee(&self, amount: f64, plan_id: &str) -> f64 {
        transaction_fee(amount, self.plans.get(plan_id))
    }

    /// Whether one more product fits the plan; unknown plans are denied
    pub fn can_add_product(&self, current_count: u32, plan_id: &str) -> bool {
        self.check_product_limit(current_count, plan_id).allowed
    }

    /// Product-limit check with remaining headroom and denial reason
    pub fn check_product_limit(&self, current_count: u32, plan_id: &str) -> EntitlementCheck {
        product_limit_check(current_count, self.plans.get(plan_id))
    }

    /// Whether a trial has ended
    pub fn is_trial_expired(&self, trial_ends_at: Option<chrono::DateTime<Utc>>) -> bool {
        is_trial_expired_at(trial_ends_at, Utc::now())
    }

    /// Whether a subscription grants paid access
    pub fn is_subscription_active(&self, status: &str, ends_at: Option<chrono::DateTime<Utc>>) -> bool {
        is_subscription_active_at(status, ends_at, Utc::now())
    }

    /// Summarise what a creator's subscription allows right now
    pub fn plan_entitlements(&self, state: &SubscriptionState, product_count: u32) -> PlanEntitlements {
        let now = Utc::now();
        let plan = self.plans.get(state.plan.as_str());

        PlanEntitlements {
            plan: state.plan.clone(),
            plan_known: plan.is_some(),
            product_count,
            product_limit: plan.and_then(|p| p.product_limit),
            can_add_product: product_limit_check(product_count, plan).allowed,
            transaction_fee_rate: plan.map_or(0.0, |p| p.transaction_fee_rate),
            trial_expired: is_trial_expired_at(state.trial_ends_at, now),
            subscription_active: is_subscription_active_at(
                &state.status,
                state.subscription_ends_at,
                now,
            ),
        }
    }
}

impl std::fmt::Debug for PricingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingService")
            .field("currencies", &self.currencies.len())
            .field("plans", &self.plans.len())
            .finish_non_exhaustive()
    }
}
