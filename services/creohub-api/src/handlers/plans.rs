//! Plan catalog and entitlement handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use creohub_db::CreatorRepository;
use creohub_types::{PlanEntitlements, PricingPlan, SubscriptionState};

use crate::error::{ApiError, ApiResult};
use crate::extractors::RequireSession;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct PlanQuery {
    /// Render prices in this currency
    pub currency: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlanView {
    #[serde(flatten)]
    pub plan: PricingPlan,
    /// Price converted and formatted for display
    pub display_price: String,
}

#[derive(Debug, Serialize)]
pub struct PlanListResponse {
    pub plans: Vec<PlanView>,
}

// ============================================================================
// Handlers
// ============================================================================

fn plan_view(state: &AppState, plan: &PricingPlan, currency: Option<&str>) -> PlanView {
    let target = currency.unwrap_or(plan.currency.as_str());
    let amount = state
        .pricing
        .convert_currency(plan.price, plan.currency.as_str(), target);

    PlanView {
        plan: plan.clone(),
        display_price: state.pricing.format_currency(amount, target),
    }
}

/// GET /api/plans
pub async fn list_plans(
    State(state): State<AppState>,
    Query(query): Query<PlanQuery>,
) -> Json<PlanListResponse> {
    let plans = state
        .pricing
        .plans()
        .map(|plan| plan_view(&state, plan, query.currency.as_deref()))
        .collect();

    Json(PlanListResponse { plans })
}

/// GET /api/plans/{id}
pub async fn get_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
    Query(query): Query<PlanQuery>,
) -> ApiResult<Json<PlanView>> {
    let plan = state
        .pricing
        .get_plan(&plan_id)
        .ok_or_else(|| ApiError::NotFound(format!("plan '{plan_id}'")))?;

    Ok(Json(plan_view(&state, plan, query.currency.as_deref())))
}

/// GET /api/entitlements
///
/// What the caller's creator account may do on its current plan
pub async fn entitlements(
    State(state): State<AppState>,
    session: RequireSession,
) -> ApiResult<Json<PlanEntitlements>> {
    let user_id = session.user_id.0;

    let subscription = state
        .repos
        .creators
        .find_subscription(user_id)
        .await?
        .map(SubscriptionState::from)
        .unwrap_or_else(SubscriptionState::free);

    let product_count = state.repos.creators.count_products(user_id).await?;
    let product_count = u32::try_from(product_count.max(0)).unwrap_or(u32::MAX);

    Ok(Json(state.pricing.plan_entitlements(&subscription, product_count)))
}
