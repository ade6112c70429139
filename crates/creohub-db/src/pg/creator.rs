//! PostgreSQL creator repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::CreatorSubscriptionRow;
use crate::repo::CreatorRepository;

/// PostgreSQL creator repository
#[derive(Clone)]
pub struct PgCreatorRepository {
    pool: PgPool,
}

impl PgCreatorRepository {
    /// Create a new creator repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreatorRepository for PgCreatorRepository {
    async fn find_subscription(&self, user_id: i64) -> DbResult<Option<CreatorSubscriptionRow>> {
        let row = sqlx::query_as::<_, CreatorSubscriptionRow>(
            r#"
            SELECT user_id, plan_type, subscription_status, subscription_ends_at, trial_ends_at
            FROM creators
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn count_products(&self, user_id: i64) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(p.id)
            FROM products p
            JOIN creators c ON c.id = p.creator_id
            WHERE c.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
