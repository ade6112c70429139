//! Session management with sliding expiry
//!
//! Sessions are opaque random tokens. The manager persists only the token
//! digest and extends the expiry on every successful validation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use creohub_db::{CreateSession, SessionRepository, UserRepository};
use creohub_types::{Session, SessionToken, UserId};
use tracing::instrument;

use crate::crypto::{generate_session_token, hash_token, is_well_formed_token};
use crate::{AuthError, SessionConfig};

/// Result of a successful validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedSession {
    /// Owner of the session
    pub user_id: UserId,
    /// Expiry after the sliding extension
    pub expires_at: DateTime<Utc>,
}

/// A newly persisted session
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Bearer token handed to the client
    pub token: SessionToken,
    /// Expiry as stored
    pub expires_at: DateTime<Utc>,
}

/// Session manager handles session creation, validation, and revocation
pub struct SessionManager<S: SessionRepository, U: UserRepository> {
    config: SessionConfig,
    timeout: chrono::Duration,
    sessions: Arc<S>,
    users: Arc<U>,
}

impl<S: SessionRepository, U: UserRepository> Clone for SessionManager<S, U> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            timeout: self.timeout,
            sessions: Arc::clone(&self.sessions),
            users: Arc::clone(&self.users),
        }
    }
}

impl<S: SessionRepository, U: UserRepository> SessionManager<S, U> {
    /// Create a new session manager
    ///
    /// # Errors
    /// Returns `AuthError::Configuration` if the config does not validate.
    pub fn new(config: SessionConfig, sessions: Arc<S>, users: Arc<U>) -> Result<Self, AuthError> {
        config.validate()?;
        let timeout = config.timeout_delta()?;
        Ok(Self {
            config,
            timeout,
            sessions,
            users,
        })
    }

    /// Session configuration in use
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Create a new session and return the bearer token
    pub async fn create_session(
        &self,
        user_id: UserId,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<SessionToken, AuthError> {
        Ok(self.issue_session(user_id, ip_address, user_agent).await?.token)
    }

    /// Create a new session, returning the token with its stored expiry
    #[instrument(skip(self, ip_address, user_agent), fields(user_id = %user_id))]
    pub async fn issue_session(
        &self,
        user_id: UserId,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<IssuedSession, AuthError> {
        let token = generate_session_token();
        let now = Utc::now();

        let create = CreateSession {
            user_id: user_id.0,
            token_hash: hash_token(token.as_str()),
            ip_address,
            user_agent,
            expires_at: now + self.timeout,
            created_at: now,
        };

        let row = self.sessions.create(create).await.map_err(|e| {
            tracing::error!("Failed to create session: {}", e);
            AuthError::StorageUnavailable("failed to create session".to_string())
        })?;

        tracing::debug!("Session created");
        Ok(IssuedSession {
            token,
            expires_at: row.expires_at,
        })
    }

    /// Validate a token and slide its expiry forward.
    ///
    /// The active/expiry check and the extension are one conditional write,
    /// so a concurrent revoke is never undone by this call.
    #[instrument(skip(self, token))]
    pub async fn validate_session(&self, token: &str) -> Result<ValidatedSession, AuthError> {
        if !is_well_formed_token(token) {
            tracing::debug!("Rejecting malformed session token");
            return Err(AuthError::InvalidToken);
        }

        let now = Utc::now();
        let extended = self
            .sessions
            .extend_if_valid(&hash_token(token), now, now + self.timeout)
            .await
            .map_err(|e| {
                tracing::error!("Failed to validate session: {}", e);
                AuthError::StorageUnavailable("failed to validate session".to_string())
            })?;

        let Some(row) = extended else {
            tracing::debug!("Session missing, revoked, or expired");
            return Err(AuthError::InvalidToken);
        };

        self.users
            .touch_last_active(row.user_id, now)
            .await
            .map_err(|e| {
                tracing::error!(user_id = row.user_id, "Failed to update user activity: {}", e);
                AuthError::StorageUnavailable("failed to update user activity".to_string())
            })?;

        Ok(ValidatedSession {
            user_id: row.user_id(),
            expires_at: row.expires_at,
        })
    }

    /// Deactivate a session. Unknown or already inactive tokens are not an error.
    #[instrument(skip(self, token))]
    pub async fn invalidate_session(&self, token: &str) -> Result<(), AuthError> {
        if !is_well_formed_token(token) {
            return Ok(());
        }

        let changed = self
            .sessions
            .deactivate(&hash_token(token))
            .await
            .map_err(|e| {
                tracing::error!("Failed to revoke session: {}", e);
                AuthError::StorageUnavailable("failed to revoke session".to_string())
            })?;

        tracing::debug!(changed, "Session invalidated");
        Ok(())
    }

    /// Deactivate every session of a user (password change, sign out everywhere)
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn invalidate_all_sessions(&self, user_id: UserId) -> Result<u64, AuthError> {
        let changed = self
            .sessions
            .deactivate_all_for_user(user_id.0)
            .await
            .map_err(|e| {
                tracing::error!("Failed to revoke sessions: {}", e);
                AuthError::StorageUnavailable("failed to revoke sessions".to_string())
            })?;

        tracing::info!(changed, "All sessions invalidated for user");
        Ok(changed)
    }

    /// Deactivate sessions that are still flagged active but past expiry
    #[instrument(skip(self))]
    pub async fn cleanup_expired(&self) -> Result<u64, AuthError> {
        let changed = self
            .sessions
            .deactivate_expired(Utc::now())
            .await
            .map_err(|e| {
                tracing::error!("Failed to clean up sessions: {}", e);
                AuthError::StorageUnavailable("failed to clean up sessions".to_string())
            })?;

        if changed > 0 {
            tracing::info!(changed, "Expired sessions deactivated");
        }
        Ok(changed)
    }

    /// Get all sessions for a user, newest first
    pub async fn list_sessions(&self, user_id: UserId) -> Result<Vec<Session>, AuthError> {
        let rows = self.sessions.find_by_user_id(user_id.0).await.map_err(|e| {
            tracing::error!("Failed to get sessions: {}", e);
            AuthError::StorageUnavailable("failed to get sessions".to_string())
        })?;

        Ok(rows.into_iter().map(|row| row.into_session()).collect())
    }
}

impl<S: SessionRepository, U: UserRepository> std::fmt::Debug for SessionManager<S, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
