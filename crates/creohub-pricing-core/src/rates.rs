//! Exchange rates
//!
//! Rates are quoted against a USD pivot: `rate(code)` is how many units of
//! `code` one US dollar buys.

use std::collections::HashMap;

use creohub_types::{CurrencyCode, DEFAULT_CURRENCY};

use crate::PricingError;

/// Source of USD-pivot exchange rates
pub trait ExchangeRateProvider: Send + Sync {
    /// Units of `code` per one USD, or `None` if the currency is unknown
    fn usd_rate(&self, code: &CurrencyCode) -> Option<f64>;

    /// Convert `amount` between two currencies through the USD pivot
    fn convert(&self, amount: f64, from: &CurrencyCode, to: &CurrencyCode) -> Option<f64> {
        if from == to {
            return Some(amount);
        }
        let from_rate = self.usd_rate(from)?;
        let to_rate = self.usd_rate(to)?;
        Some(amount / from_rate * to_rate)
    }
}

/// Fixed rate table loaded once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct StaticRateTable {
    rates: HashMap<CurrencyCode, f64>,
}

impl StaticRateTable {
    /// Build a table, rejecting non-positive or non-finite rates
    pub fn new(rates: HashMap<CurrencyCode, f64>) -> Result<Self, PricingError> {
        if let Some((code, rate)) = rates.iter().find(|(_, r)| !r.is_finite() || **r <= 0.0) {
            return Err(PricingError::Catalog(format!("rate for {code} must be positive, got {rate}")));
        }
        let mut rates = rates;
        rates.entry(CurrencyCode::default_currency()).or_insert(1.0);
        Ok(Self { rates })
    }

    /// Built-in indicative rates
    pub fn builtin() -> Self {
        let rates = [
            (DEFAULT_CURRENCY, 1.0),
            ("EUR", 0.92),
            ("GBP", 0.79),
            ("CAD", 1.36),
            ("AUD", 1.52),
            ("INR", 83.5),
            ("KES", 129.0),
            ("NGN", 1550.0),
            ("GHS", 15.5),
            ("ZAR", 18.5),
            ("UGX", 3700.0),
            ("TZS", 2600.0),
        ]
        .into_iter()
        .filter_map(|(code, rate)| CurrencyCode::parse(code).ok().map(|c| (c, rate)))
        .collect();

        Self { rates }
    }

    /// Number of currencies with a known rate
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for StaticRateTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ExchangeRateProvider for StaticRateTable {
    fn usd_rate(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates.get(code).copied()
    }
}
