//! Entitlement types

use serde::{Deserialize, Serialize};

use crate::PlanId;

/// Entitlement check result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementCheck {
    /// Whether access is allowed
    pub allowed: bool,
    /// Reason if denied
    pub reason: Option<String>,
    /// Remaining usage (if limited)
    pub remaining: Option<u64>,
}

impl EntitlementCheck {
    /// Allowed with optional remaining allowance
    pub fn allow(remaining: Option<u64>) -> Self {
        Self {
            allowed: true,
            reason: None,
            remaining,
        }
    }

    /// Denied with a reason
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
            remaining: Some(0),
        }
    }
}

/// Summary of what a creator's subscription currently allows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntitlements {
    /// Plan the creator is on
    pub plan: PlanId,
    /// Whether the plan exists in the catalog
    pub plan_known: bool,
    /// Products the creator already has
    pub product_count: u32,
    /// Product limit, `None` for unlimited
    pub product_limit: Option<u32>,
    /// Whether one more product may be added
    pub can_add_product: bool,
    /// Platform fee rate applied to sales
    pub transaction_fee_rate: f64,
    /// Whether the trial window has passed
    pub trial_expired: bool,
    /// Whether the paid subscription is active
    pub subscription_active: bool,
}
