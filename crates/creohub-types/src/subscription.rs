//! Subscription types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::PlanId;

/// The only subscription status that grants paid access
pub const ACTIVE_STATUS: &str = "active";

/// Subscription state stored on a creator account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionState {
    /// Current plan
    pub plan: PlanId,
    /// Provider status string (`active`, `trialing`, `canceled`, ...)
    pub status: String,
    /// End of the paid period, if any
    pub subscription_ends_at: Option<DateTime<Utc>>,
    /// End of the trial, if any
    pub trial_ends_at: Option<DateTime<Utc>>,
}

impl SubscriptionState {
    /// Free plan with no subscription
    pub fn free() -> Self {
        Self {
            plan: PlanId::new("free"),
            status: "inactive".to_string(),
            subscription_ends_at: None,
            trial_ends_at: None,
        }
    }
}
