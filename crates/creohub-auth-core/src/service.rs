//! Auth service - ties together password login and session management

use std::sync::Arc;

use chrono::{DateTime, Utc};
use creohub_db::{SessionRepository, UserRepository};
use creohub_types::{Session, SessionToken, UserId};

use crate::password::{verify_dummy_password, verify_password};
use crate::session::{SessionManager, ValidatedSession};
use crate::{AuthError, SessionConfig};

/// Successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Authenticated user
    pub user_id: UserId,
    /// Bearer token for subsequent requests
    pub token: SessionToken,
    /// Initial expiry
    pub expires_at: DateTime<Utc>,
}

/// Authentication service
///
/// Provides unified interface for:
/// - Email/password login
/// - Session validation and revocation
pub struct AuthService<U: UserRepository, S: SessionRepository> {
    sessions: SessionManager<S, U>,
    user_repo: Arc<U>,
}

impl<U: UserRepository, S: SessionRepository> AuthService<U, S> {
    /// Create a new auth service
    pub fn new(config: SessionConfig, user_repo: Arc<U>, session_repo: Arc<S>) -> Result<Self, AuthError> {
        Ok(Self {
            sessions: SessionManager::new(config, session_repo, Arc::clone(&user_repo))?,
            user_repo,
        })
    }

    /// Underlying session manager
    pub fn sessions(&self) -> &SessionManager<S, U> {
        &self.sessions
    }

    // =========================================================================
    // Login
    // =========================================================================

    /// Verify credentials and open a session
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`
    /// after the same argon2 work.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<LoginOutcome, AuthError> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            verify_dummy_password(password);
            return Err(AuthError::InvalidCredentials);
        };

        let matches = verify_password(password, &user.password_hash).map_err(|e| {
            tracing::error!(user_id = user.id, "Stored password hash is unreadable: {}", e);
            AuthError::Internal("stored password hash is unreadable".to_string())
        })?;
        if !matches {
            tracing::debug!(user_id = user.id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self
            .sessions
            .issue_session(user.user_id(), ip_address, user_agent)
            .await?;

        tracing::info!(user_id = user.id, "User logged in");
        Ok(LoginOutcome {
            user_id: user.user_id(),
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    // =========================================================================
    // Session Management
    // =========================================================================

    /// Resolve a bearer token to its user, sliding the expiry
    pub async fn authenticate(&self, token: &str) -> Result<ValidatedSession, AuthError> {
        self.sessions.validate_session(token).await
    }

    /// Log out the session behind `token`
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        self.sessions.invalidate_session(token).await
    }

    /// Log out every session of a user
    pub async fn logout_everywhere(&self, user_id: UserId) -> Result<u64, AuthError> {
        self.sessions.invalidate_all_sessions(user_id).await
    }

    /// Sessions of a user, newest first
    pub async fn list_sessions(&self, user_id: UserId) -> Result<Vec<Session>, AuthError> {
        self.sessions.list_sessions(user_id).await
    }

    /// Run one cleanup sweep
    pub async fn cleanup_expired(&self) -> Result<u64, AuthError> {
        self.sessions.cleanup_expired().await
    }
}

impl<U: UserRepository, S: SessionRepository> std::fmt::Debug for AuthService<U, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("sessions", &self.sessions)
            .finish()
    }
}
