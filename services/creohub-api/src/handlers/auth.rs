//! Authentication handlers (login, logout, session introspection)

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use creohub_types::{Session, SessionState};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{ClientContext, RequireSession};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
    pub expires_in: u64,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct LogoutAllResponse {
    pub success: bool,
    pub sessions_revoked: u64,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
    /// Idle timeout the client watchdog should mirror
    pub timeout_secs: u64,
    /// Seconds before timeout to warn the user
    pub warning_lead_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: i64,
    pub state: SessionState,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionView {
    fn from_session(session: Session, now: DateTime<Utc>) -> Self {
        Self {
            id: session.id,
            state: session.state_at(now),
            ip_address: session.ip_address,
            user_agent: session.user_agent,
            created_at: session.created_at,
            last_used_at: session.last_used_at,
            expires_at: session.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionView>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/login
///
/// Verify email and password and issue a bearer token
pub async fn login(
    State(state): State<AppState>,
    client: ClientContext,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let email = req.email.trim();
    if email.is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest("email and password are required".to_string()));
    }

    let outcome = state
        .auth
        .login(
            email,
            &req.password,
            client.ip.map(|ip| ip.to_string()),
            client.user_agent,
        )
        .await?;

    Ok(Json(LoginResponse {
        token: outcome.token.into_inner(),
        token_type: "Bearer",
        user_id: outcome.user_id.0,
        expires_at: outcome.expires_at,
        expires_in: state.config.session.timeout.as_secs(),
    }))
}

/// POST /api/auth/logout
///
/// Revoke the presented session
pub async fn logout(
    State(state): State<AppState>,
    session: RequireSession,
) -> ApiResult<Json<LogoutResponse>> {
    state.auth.logout(session.token.as_str()).await?;
    Ok(Json(LogoutResponse { success: true }))
}

/// POST /api/auth/logout-all
///
/// Revoke every session of the caller, including this one
pub async fn logout_all(
    State(state): State<AppState>,
    session: RequireSession,
) -> ApiResult<Json<LogoutAllResponse>> {
    let sessions_revoked = state.auth.logout_everywhere(session.user_id).await?;
    Ok(Json(LogoutAllResponse {
        success: true,
        sessions_revoked,
    }))
}

/// GET /api/auth/session
///
/// Who am I; also refreshes the sliding expiry
pub async fn current_session(
    State(state): State<AppState>,
    session: RequireSession,
) -> Json<SessionResponse> {
    let config = &state.config.session;
    Json(SessionResponse {
        user_id: session.user_id.0,
        expires_at: session.expires_at,
        timeout_secs: config.timeout.as_secs(),
        warning_lead_secs: config.warning_lead.as_secs(),
    })
}

/// GET /api/auth/sessions
///
/// The caller's sessions, newest first
pub async fn list_sessions(
    State(state): State<AppState>,
    session: RequireSession,
) -> ApiResult<Json<SessionListResponse>> {
    let now = Utc::now();
    let sessions = state
        .auth
        .list_sessions(session.user_id)
        .await?
        .into_iter()
        .map(|s| SessionView::from_session(s, now))
        .collect();

    Ok(Json(SessionListResponse { sessions }))
}
