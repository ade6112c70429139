//! Common error types

use thiserror::Error;

/// Errors raised while constructing domain values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Not a three-letter currency code
    #[error("invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    /// Unknown billing interval
    #[error("invalid billing interval: {0}")]
    InvalidBillingInterval(String),

    /// Blank plan identifier
    #[error("invalid plan id: {0:?}")]
    InvalidPlanId(String),
}
