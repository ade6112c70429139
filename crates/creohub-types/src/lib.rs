//! Creohub Types - Shared domain types
//!
//! This crate contains domain types used across Creohub services:
//! - User identity and sessions
//! - Supported currencies
//! - Pricing plans, subscription state and entitlements

pub mod currency;
pub mod entitlement;
pub mod error;
pub mod plan;
pub mod session;
pub mod subscription;
pub mod user;

pub use currency::*;
pub use entitlement::*;
pub use error::*;
pub use plan::*;
pub use session::*;
pub use subscription::*;
pub use user::*;
