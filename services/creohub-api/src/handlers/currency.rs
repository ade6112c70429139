//! Currency handlers (catalog, detection, conversion)

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use creohub_types::SupportedCurrency;

use crate::error::{ApiError, ApiResult};
use crate::extractors::ClientContext;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CurrencyListResponse {
    pub currencies: Vec<SupportedCurrency>,
    pub default: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct DetectQuery {
    /// Previously saved client preference
    pub preference: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DetectResponse {
    pub currency: String,
    pub symbol: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub converted: f64,
    pub formatted: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/currencies
pub async fn list_currencies(State(state): State<AppState>) -> Json<CurrencyListResponse> {
    Json(CurrencyListResponse {
        currencies: state.pricing.currencies().cloned().collect(),
        default: creohub_types::DEFAULT_CURRENCY,
    })
}

/// GET /api/currency/detect
///
/// Preference, then IP geolocation, then `Accept-Language`, then USD
pub async fn detect_currency(
    State(state): State<AppState>,
    client: ClientContext,
    Query(query): Query<DetectQuery>,
) -> Json<DetectResponse> {
    let code = state
        .pricing
        .resolve_for_ip(query.preference.as_deref(), client.ip, client.locale.as_deref())
        .await;

    let entry = state.pricing.get_currency(code.as_str());
    Json(DetectResponse {
        symbol: entry.map(|c| c.symbol.clone()),
        name: entry.map(|c| c.name.clone()),
        currency: code.into(),
    })
}

/// POST /api/currency/convert
pub async fn convert_currency(
    State(state): State<AppState>,
    Json(req): Json<ConvertRequest>,
) -> ApiResult<Json<ConvertResponse>> {
    if !req.amount.is_finite() {
        return Err(ApiError::BadRequest("amount must be a finite number".to_string()));
    }

    let converted = state.pricing.convert_currency(req.amount, &req.from, &req.to);
    let formatted = state.pricing.format_currency(converted, &req.to);

    Ok(Json(ConvertResponse {
        amount: req.amount,
        from: req.from.trim().to_ascii_uppercase(),
        to: req.to.trim().to_ascii_uppercase(),
        converted,
        formatted,
    }))
}
