//! HTTP handlers

mod auth;
mod currency;
mod health;
mod plans;

pub use auth::{current_session, list_sessions, login, logout, logout_all};
pub use currency::{convert_currency, detect_currency, list_currencies};
pub use health::{health, ready};
pub use plans::{entitlements, get_plan, list_plans};
