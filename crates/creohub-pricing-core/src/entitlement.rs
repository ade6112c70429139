//! Plan entitlement rules
//!
//! Pure functions over a plan and a clock reading; the service supplies
//! `Utc::now()` and the catalog lookup.

use chrono::{DateTime, Utc};
use creohub_types::{EntitlementCheck, PricingPlan, ACTIVE_STATUS};

/// Round to two decimal places (half away from zero)
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Platform fee on a sale; zero when the plan is unknown
pub fn transaction_fee(amount: f64, plan: Option<&PricingPlan>) -> f64 {
    match plan {
        Some(plan) => round_to_cents(amount * plan.transaction_fee_rate),
        None => 0.0,
    }
}

/// Product-limit check; unknown plans are denied
pub fn product_limit_check(current_count: u32, plan: Option<&PricingPlan>) -> EntitlementCheck {
    let Some(plan) = plan else {
        return EntitlementCheck::deny("unknown plan");
    };

    match plan.product_limit {
        None => EntitlementCheck::allow(None),
        Some(limit) if current_count < limit => {
            EntitlementCheck::allow(Some(u64::from(limit - current_count)))
        }
        Some(limit) => EntitlementCheck::deny(format!(
            "{} plan allows up to {limit} products",
            plan.name
        )),
    }
}

/// Whether a trial has ended; no trial end means not expired
pub fn is_trial_expired_at(trial_ends_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    trial_ends_at.is_some_and(|ends| now > ends)
}

/// Whether a subscription grants paid access
///
/// Only the `active` status counts; an active subscription without an end
/// date never lapses.
pub fn is_subscription_active_at(
    status: &str,
    subscription_ends_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    if status != ACTIVE_STATUS {
        return false;
    }
    subscription_ends_at.map_or(true, |ends| now < ends)
}
