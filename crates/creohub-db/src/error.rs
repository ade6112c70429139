//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration failure
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Store could not be reached (used by non-SQL repositories)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for repository calls
pub type DbResult<T> = Result<T, DbError>;
