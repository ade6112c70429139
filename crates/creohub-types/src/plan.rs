//! Pricing plan types

use serde::{Deserialize, Serialize};

use crate::{CurrencyCode, DomainError};

/// Pricing plan identifier (e.g. `free`, `starter`, `pro`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlanId(String);

impl PlanId {
    /// Create a plan ID, normalized to lowercase
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_ascii_lowercase())
    }

    /// Normalize an ID, rejecting blank input
    pub fn parse(id: &str) -> Result<Self, DomainError> {
        let id = Self::new(id);
        if id.0.is_empty() {
            return Err(DomainError::InvalidPlanId(id.0));
        }
        Ok(id)
    }

    /// Borrow the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlanId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl TryFrom<String> for PlanId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PlanId> for String {
    fn from(id: PlanId) -> Self {
        id.0
    }
}

/// Billing interval of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    /// Billed every month
    Monthly,
    /// Billed every year
    Yearly,
    /// Not billed (free plan)
    None,
}

impl std::fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
            Self::None => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for BillingInterval {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" | "annual" => Ok(Self::Yearly),
            "none" | "" => Ok(Self::None),
            _ => Err(DomainError::InvalidBillingInterval(s.to_string())),
        }
    }
}

/// Subscription plan offered to creators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPlan {
    /// Plan identifier
    pub id: PlanId,
    /// Display name
    pub name: String,
    /// Base price per interval
    pub price: f64,
    /// Currency the base price is quoted in
    pub currency: CurrencyCode,
    /// Billing interval
    pub interval: BillingInterval,
    /// Marketing feature list
    #[serde(default)]
    pub features: Vec<String>,
    /// Fraction of each sale retained by the platform (0.05 = 5%)
    pub transaction_fee_rate: f64,
    /// Maximum number of products, `None` for unlimited
    pub product_limit: Option<u32>,
    /// Trial length in days
    #[serde(default)]
    pub trial_days: Option<u32>,
    /// Highlighted on the pricing page
    #[serde(default)]
    pub popular: bool,
}

impl PricingPlan {
    /// Whether the plan has no product limit
    pub fn is_unlimited(&self) -> bool {
        self.product_limit.is_none()
    }

    /// Whether the plan is free of charge
    pub fn is_free(&self) -> bool {
        self.price <= 0.0
    }
}
