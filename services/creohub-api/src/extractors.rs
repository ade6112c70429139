//! Axum extractors for authentication and client context

use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use creohub_auth_core::AuthError;
use creohub_types::{SessionToken, UserId};

use crate::state::AppState;

/// Caller holding a valid session
///
/// Extraction validates the bearer token, which also slides its expiry.
#[derive(Debug, Clone)]
pub struct RequireSession {
    pub user_id: UserId,
    pub token: SessionToken,
    pub expires_at: DateTime<Utc>,
}

/// Error response for auth failures
#[derive(Debug, Serialize)]
struct AuthErrorResponse {
    error: AuthErrorDetail,
}

#[derive(Debug, Serialize)]
struct AuthErrorDetail {
    code: &'static str,
    message: &'static str,
}

/// Auth rejection type
#[derive(Debug)]
pub struct AuthRejection {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
}

impl AuthRejection {
    fn unauthenticated(code: &'static str, message: &'static str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code,
            message,
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = AuthErrorResponse {
            error: AuthErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for RequireSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let token = bearer_token(&parts.headers)?;

        match app_state.auth.authenticate(&token).await {
            Ok(session) => Ok(Self {
                user_id: session.user_id,
                token: SessionToken::new(token),
                expires_at: session.expires_at,
            }),
            Err(AuthError::StorageUnavailable(_)) => Err(AuthRejection {
                status: StatusCode::SERVICE_UNAVAILABLE,
                code: "STORAGE_UNAVAILABLE",
                message: "Session store unavailable",
            }),
            Err(e) if e.is_unauthenticated() => {
                tracing::debug!("Session rejected");
                Err(AuthRejection::unauthenticated(
                    "INVALID_SESSION",
                    "Invalid or expired session",
                ))
            }
            Err(e) => {
                tracing::error!(error = ?e, "Session validation failed");
                Err(AuthRejection {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: "INTERNAL_ERROR",
                    message: "Session validation failed",
                })
            }
        }
    }
}

/// Extract the token from `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Result<String, AuthRejection> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Err(AuthRejection::unauthenticated(
            "MISSING_TOKEN",
            "No authentication token provided",
        ));
    };

    let value = value.to_str().map_err(|_| AuthRejection {
        status: StatusCode::BAD_REQUEST,
        code: "INVALID_HEADER",
        message: "Invalid Authorization header encoding",
    })?;

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(AuthRejection::unauthenticated(
            "MISSING_TOKEN",
            "No authentication token provided",
        )),
    }
}

/// Where a request came from: client IP, user agent, preferred locale
#[derive(Debug, Clone, Default)]
pub struct ClientContext {
    pub ip: Option<IpAddr>,
    pub user_agent: Option<String>,
    pub locale: Option<String>,
}

impl<S> FromRequestParts<S> for ClientContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        Ok(Self {
            ip: forwarded_for(&parts.headers).or(peer),
            user_agent: header_string(&parts.headers, header::USER_AGENT.as_str()),
            locale: header_string(&parts.headers, header::ACCEPT_LANGUAGE.as_str()),
        })
    }
}

/// First address in `X-Forwarded-For`
fn forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
