//! PostgreSQL session repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::SessionRow;
use crate::repo::{CreateSession, SessionRepository};

/// Column list shared across queries
const COLUMNS: &str = "id, user_id, session_token, ip_address, user_agent, \
                       is_active, expires_at, last_used_at, created_at";

/// PostgreSQL session repository
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Create a new session repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create(&self, session: CreateSession) -> DbResult<SessionRow> {
        let query = format!(
            "INSERT INTO user_sessions
                 (user_id, session_token, ip_address, user_agent, expires_at, last_used_at, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, SessionRow>(&query)
            .bind(session.user_id)
            .bind(&session.token_hash)
            .bind(&session.ip_address)
            .bind(&session.user_agent)
            .bind(session.expires_at)
            .bind(session.created_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn find_by_user_id(&self, user_id: i64) -> DbResult<Vec<SessionRow>> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, SessionRow>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn extend_if_valid(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
        new_expires_at: DateTime<Utc>,
    ) -> DbResult<Option<SessionRow>> {
        // The predicate and the write run as one statement, so a concurrent
        // deactivate either lands first (no row matches) or after (row stays inactive).
        let query = format!(
            "UPDATE user_sessions
             SET expires_at = $3, last_used_at = $2
             WHERE session_token = $1 AND is_active AND expires_at > $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, SessionRow>(&query)
            .bind(token_hash)
            .bind(now)
            .bind(new_expires_at)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn deactivate(&self, token_hash: &str) -> DbResult<u64> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_active = FALSE WHERE session_token = $1 AND is_active",
        )
        .bind(token_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn deactivate_all_for_user(&self, user_id: i64) -> DbResult<u64> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_active = FALSE WHERE user_id = $1 AND is_active",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn deactivate_expired(&self, now: DateTime<Utc>) -> DbResult<u64> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_active = FALSE WHERE is_active AND expires_at < $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
