//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::DbResult;
use crate::models::*;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>>;

    /// Record user activity
    async fn touch_last_active(&self, id: i64, at: DateTime<Utc>) -> DbResult<()>;
}

/// Session repository trait
///
/// Every mutation is scoped by token digest or user id.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert a new session
    async fn create(&self, session: CreateSession) -> DbResult<SessionRow>;

    /// Find all sessions for a user, newest first
    async fn find_by_user_id(&self, user_id: i64) -> DbResult<Vec<SessionRow>>;

    /// Slide the expiry of a valid session.
    ///
    /// Must be a single conditional write: the row is updated only if it is
    /// active and `expires_at > now`, and the updated row is returned.
    /// `None` means the session was missing, revoked, or expired.
    async fn extend_if_valid(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
        new_expires_at: DateTime<Utc>,
    ) -> DbResult<Option<SessionRow>>;

    /// Deactivate one session. Returns rows changed (0 when already inactive or unknown).
    async fn deactivate(&self, token_hash: &str) -> DbResult<u64>;

    /// Deactivate every active session of a user
    async fn deactivate_all_for_user(&self, user_id: i64) -> DbResult<u64>;

    /// Deactivate active sessions whose expiry is before `now`
    async fn deactivate_expired(&self, now: DateTime<Utc>) -> DbResult<u64>;
}

/// Create session input
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: i64,
    pub token_hash: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Creator repository trait
#[async_trait]
pub trait CreatorRepository: Send + Sync {
    /// Subscription columns of the creator owned by `user_id`
    async fn find_subscription(&self, user_id: i64) -> DbResult<Option<CreatorSubscriptionRow>>;

    /// Number of products owned by the creator of `user_id`
    async fn count_products(&self, user_id: i64) -> DbResult<i64>;
}
