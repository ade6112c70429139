//! Currency types

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Currency used when no other signal is available
pub const DEFAULT_CURRENCY: &str = "USD";

/// ISO-4217 style currency code (three ASCII letters, upper-cased)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse and normalize a currency code
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidCurrencyCode(code.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// The default currency (`USD`)
    pub fn default_currency() -> Self {
        Self(DEFAULT_CURRENCY.to_string())
    }

    /// Borrow the code
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::default_currency()
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl PartialEq<str> for CurrencyCode {
    fn eq(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl PartialEq<&str> for CurrencyCode {
    fn eq(&self, other: &&str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

/// Entry of the supported-currency catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportedCurrency {
    /// Currency code
    pub code: CurrencyCode,
    /// Display symbol (e.g. `$`, `KSh`)
    pub symbol: String,
    /// Human readable name
    pub name: String,
    /// ISO-3166 alpha-2 country codes that use this currency
    #[serde(default)]
    pub countries: Vec<String>,
    /// Minor-unit digits shown when formatting
    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

fn default_decimals() -> u8 {
    2
}

impl SupportedCurrency {
    /// Whether this currency is used in the given country (case-insensitive)
    pub fn used_in(&self, country_code: &str) -> bool {
        let country_code = country_code.trim();
        self.countries
            .iter()
            .any(|c| c.eq_ignore_ascii_case(country_code))
    }
}
