//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use creohub_types::{PlanId, Session, SubscriptionState, UserId};
use sqlx::FromRow;

/// User row from the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub last_active_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Session row from the database
///
/// `session_token` holds the SHA-256 digest of the bearer token.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: i64,
    pub user_id: i64,
    pub session_token: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub is_active: bool,
    pub expires_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Creator subscription columns
#[derive(Debug, Clone, FromRow)]
pub struct CreatorSubscriptionRow {
    pub user_id: i64,
    pub plan_type: String,
    pub subscription_status: String,
    pub subscription_ends_at: Option<DateTime<Utc>>,
    pub trial_ends_at: Option<DateTime<Utc>>,
}

impl UserRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> UserId {
        UserId(self.id)
    }
}

impl SessionRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> UserId {
        UserId(self.user_id)
    }

    /// Convert to the domain session (drops the token digest)
    pub fn into_session(self) -> Session {
        Session {
            id: self.id,
            user_id: UserId(self.user_id),
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            is_active: self.is_active,
            expires_at: self.expires_at,
            last_used_at: self.last_used_at,
            created_at: self.created_at,
        }
    }
}

impl From<CreatorSubscriptionRow> for SubscriptionState {
    fn from(row: CreatorSubscriptionRow) -> Self {
        Self {
            plan: PlanId::new(&row.plan_type),
            status: row.subscription_status,
            subscription_ends_at: row.subscription_ends_at,
            trial_ends_at: row.trial_ends_at,
        }
    }
}
