//! Immutable currency and plan catalogs
//!
//! Loaded once at startup, either from the built-in tables below or from a
//! JSON file, then shared read-only behind an `Arc`.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use creohub_types::{BillingInterval, CurrencyCode, PlanId, PricingPlan, SupportedCurrency};
use serde::Deserialize;

use crate::rates::{ExchangeRateProvider, StaticRateTable};
use crate::PricingError;

// =============================================================================
// Currencies
// =============================================================================

/// Ordered set of supported currencies
///
/// Order matters: country lookups return the first entry that lists the
/// country.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyCatalog {
    entries: Vec<SupportedCurrency>,
}

impl CurrencyCatalog {
    /// Build a catalog, rejecting empty or duplicate entries
    pub fn new(entries: Vec<SupportedCurrency>) -> Result<Self, PricingError> {
        if entries.is_empty() {
            return Err(PricingError::Catalog("currency catalog is empty".to_string()));
        }
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.code.clone()) {
                return Err(PricingError::Catalog(format!("duplicate currency {}", entry.code)));
            }
        }
        Ok(Self { entries })
    }

    /// Built-in currencies
    pub fn builtin() -> Self {
        let entries = [
            ("USD", "$", "US Dollar", &["US", "EC", "SV", "PR"][..], 2),
            ("EUR", "€", "Euro", &["DE", "FR", "IT", "ES", "NL", "BE", "AT", "IE", "PT", "FI", "GR"][..], 2),
            ("GBP", "£", "British Pound", &["GB"][..], 2),
            ("CAD", "CA$", "Canadian Dollar", &["CA"][..], 2),
            ("AUD", "A$", "Australian Dollar", &["AU"][..], 2),
            ("INR", "₹", "Indian Rupee", &["IN"][..], 2),
            ("KES", "KSh", "Kenyan Shilling", &["KE"][..], 2),
            ("NGN", "₦", "Nigerian Naira", &["NG"][..], 2),
            ("GHS", "GH₵", "Ghanaian Cedi", &["GH"][..], 2),
            ("ZAR", "R", "South African Rand", &["ZA", "LS", "NA"][..], 2),
            ("UGX", "USh", "Ugandan Shilling", &["UG"][..], 0),
            ("TZS", "TSh", "Tanzanian Shilling", &["TZ"][..], 2),
        ]
        .into_iter()
        .filter_map(|(code, symbol, name, countries, decimals)| {
            Some(SupportedCurrency {
                code: CurrencyCode::parse(code).ok()?,
                symbol: symbol.to_string(),
                name: name.to_string(),
                countries: countries.iter().map(|c| c.to_string()).collect(),
                decimals,
            })
        })
        .collect();

        Self { entries }
    }

    /// Look up a currency by code (case-insensitive)
    pub fn get(&self, code: &str) -> Option<&SupportedCurrency> {
        self.entries.iter().find(|c| c.code == code.trim())
    }

    /// Whether a code is supported
    pub fn is_supported(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// First currency used in `country_code`
    pub fn for_country(&self, country_code: &str) -> Option<&SupportedCurrency> {
        self.entries.iter().find(|c| c.used_in(country_code))
    }

    /// All currencies in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &SupportedCurrency> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Plans
// =============================================================================

/// Subscription plans keyed by id
#[derive(Debug, Clone, PartialEq)]
pub struct PlanCatalog {
    plans: Vec<PricingPlan>,
}

impl PlanCatalog {
    /// Build a catalog, rejecting duplicates and out-of-range values
    pub fn new(plans: Vec<PricingPlan>) -> Result<Self, PricingError> {
        let mut seen = HashSet::new();
        for plan in &plans {
            if !seen.insert(plan.id.clone()) {
                return Err(PricingError::Catalog(format!("duplicate plan {}", plan.id)));
            }
            if !(0.0..=1.0).contains(&plan.transaction_fee_rate) {
                return Err(PricingError::Catalog(format!(
                    "plan {} fee rate {} outside 0..=1",
                    plan.id, plan.transaction_fee_rate
                )));
            }
            if !plan.price.is_finite() || plan.price < 0.0 {
                return Err(PricingError::Catalog(format!("plan {} has invalid price", plan.id)));
            }
        }
        Ok(Self { plans })
    }

    /// Built-in plans: free, starter, pro
    pub fn builtin() -> Self {
        let usd = CurrencyCode::default_currency();
        let plans = vec![
            PricingPlan {
                id: PlanId::new("free"),
                name: "Free".to_string(),
                price: 0.0,
                currency: usd.clone(),
                interval: BillingInterval::None,
                features: vec![
                    "Up to 3 products".to_string(),
                    "Basic storefront".to_string(),
                    "10% transaction fee".to_string(),
                ],
                transaction_fee_rate: 0.10,
                product_limit: Some(3),
                trial_days: None,
                popular: false,
            },
            PricingPlan {
                id: PlanId::new("starter"),
                name: "Starter".to_string(),
                price: 9.99,
                currency: usd.clone(),
                interval: BillingInterval::Monthly,
                features: vec![
                    "Up to 25 products".to_string(),
                    "Custom storefront theme".to_string(),
                    "Sales analytics".to_string(),
                    "5% transaction fee".to_string(),
                ],
                transaction_fee_rate: 0.05,
                product_limit: Some(25),
                trial_days: Some(14),
                popular: true,
            },
            PricingPlan {
                id: PlanId::new("pro"),
                name: "Pro".to_string(),
                price: 29.99,
                currency: usd,
                interval: BillingInterval::Monthly,
                features: vec![
                    "Unlimited products".to_string(),
                    "Custom domain".to_string(),
                    "Priority support".to_string(),
                    "No transaction fee".to_string(),
                ],
                transaction_fee_rate: 0.0,
                product_limit: None,
                trial_days: Some(14),
                popular: false,
            },
        ];

        Self { plans }
    }

    /// Look up a plan by id (case-insensitive)
    pub fn get(&self, plan_id: &str) -> Option<&PricingPlan> {
        let id = PlanId::new(plan_id);
        self.plans.iter().find(|p| p.id == id)
    }

    /// All plans in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &PricingPlan> {
        self.plans.iter()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

// =============================================================================
// Loading
// =============================================================================

/// On-disk catalog shape; every section is optional and falls back to the
/// built-in table.
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    currencies: Option<Vec<SupportedCurrency>>,
    #[serde(default)]
    plans: Option<Vec<PricingPlan>>,
    #[serde(default)]
    usd_rates: Option<HashMap<CurrencyCode, f64>>,
}

/// Everything the pricing service reads at runtime
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogs {
    pub currencies: CurrencyCatalog,
    pub plans: PlanCatalog,
    pub rates: StaticRateTable,
}

impl Catalogs {
    /// Built-in catalogs
    pub fn builtin() -> Self {
        Self {
            currencies: CurrencyCatalog::builtin(),
            plans: PlanCatalog::builtin(),
            rates: StaticRateTable::builtin(),
        }
    }

    /// Parse catalogs from JSON
    pub fn from_json(json: &str) -> Result<Self, PricingError> {
        let file: CatalogFile = serde_json::from_str(json)?;

        let currencies = match file.currencies {
            Some(entries) => CurrencyCatalog::new(entries)?,
            None => CurrencyCatalog::builtin(),
        };
        let plans = match file.plans {
            Some(plans) => PlanCatalog::new(plans)?,
            None => PlanCatalog::builtin(),
        };
        let rates = match file.usd_rates {
            Some(rates) => StaticRateTable::new(rates)?,
            None => StaticRateTable::builtin(),
        };

        let catalogs = Self {
            currencies,
            plans,
            rates,
        };
        catalogs.check_consistent()?;
        Ok(catalogs)
    }

    /// Every supported currency must have a rate and every plan must be
    /// quoted in a supported currency.
    fn check_consistent(&self) -> Result<(), PricingError> {
        if let Some(missing) = self.currencies.iter().find(|c| self.rates.usd_rate(&c.code).is_none()) {
            return Err(PricingError::Catalog(format!("no exchange rate for currency {}", missing.code)));
        }
        if let Some(plan) = self.plans.iter().find(|p| !self.currencies.is_supported(p.currency.as_str())) {
            return Err(PricingError::Catalog(format!(
                "plan {} is priced in unsupported currency {}",
                plan.id, plan.currency
            )));
        }
        Ok(())
    }

    /// Load catalogs from a JSON file
    pub fn load(path: &Path) -> Result<Self, PricingError> {
        let json = std::fs::read_to_string(path)?;
        let catalogs = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            currencies = catalogs.currencies.len(),
            plans = catalogs.plans.len(),
            "Loaded pricing catalog"
        );
        Ok(catalogs)
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::builtin()
    }
}
