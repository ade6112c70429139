//! Session types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// Opaque bearer token handed to the client.
///
/// The plaintext never reaches storage; only its digest does.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a token string
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the token string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper
    pub fn into_inner(self) -> String {
        self.0
    }
}

// Tokens are credentials; keep them out of logs.
impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SessionToken").field(&"<redacted>").finish()
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lifecycle state of a session row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Active and within its expiry window
    Active,
    /// Still flagged active but past its expiry
    Expired,
    /// Explicitly deactivated (logout, logout-everywhere, cleanup)
    Revoked,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Expired => write!(f, "expired"),
            Self::Revoked => write!(f, "revoked"),
        }
    }
}

/// User session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Row ID
    pub id: i64,
    /// User who owns the session
    pub user_id: UserId,
    /// IP address the session was created from
    pub ip_address: Option<String>,
    /// User agent string
    pub user_agent: Option<String>,
    /// Whether the session is still active
    pub is_active: bool,
    /// Sliding expiration time
    pub expires_at: DateTime<Utc>,
    /// Last successful validation
    pub last_used_at: DateTime<Utc>,
    /// Session creation time
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// State of the session at `now`
    pub fn state_at(&self, now: DateTime<Utc>) -> SessionState {
        if !self.is_active {
            SessionState::Revoked
        } else if now >= self.expires_at {
            SessionState::Expired
        } else {
            SessionState::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(is_active: bool, expires_in: Duration) -> Session {
        let now = Utc::now();
        Session {
            id: 1,
            user_id: UserId(1),
            ip_address: None,
            user_agent: None,
            is_active,
            expires_at: now + expires_in,
            last_used_at: now,
            created_at: now,
        }
    }

    #[test]
    fn test_session_state() {
        let now = Utc::now();
        assert_eq!(session(true, Duration::minutes(5)).state_at(now), SessionState::Active);
        assert_eq!(session(true, Duration::minutes(-5)).state_at(now), SessionState::Expired);
        // Revoked wins over expiry
        assert_eq!(session(false, Duration::minutes(-5)).state_at(now), SessionState::Revoked);
        assert_eq!(session(false, Duration::minutes(5)).state_at(now), SessionState::Revoked);
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = SessionToken::new("deadbeef");
        assert!(!format!("{token:?}").contains("deadbeef"));
        assert_eq!(token.as_str(), "deadbeef");
    }
}
