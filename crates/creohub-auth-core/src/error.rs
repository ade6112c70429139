//! Auth errors

use thiserror::Error;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Token absent, malformed, inactive, or expired
    #[error("invalid token")]
    InvalidToken,

    /// Unknown email or wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Persistence layer failed; never converted into a success
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidToken | Self::InvalidCredentials => 401,
            Self::StorageUnavailable(_) => 503,
            Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller should be asked to sign in again
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::InvalidToken | Self::InvalidCredentials)
    }
}

impl From<creohub_db::DbError> for AuthError {
    fn from(err: creohub_db::DbError) -> Self {
        tracing::error!("Database error: {}", err);
        Self::StorageUnavailable(err.to_string())
    }
}
