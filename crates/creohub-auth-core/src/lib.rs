//! Creohub Auth Core - Authentication business logic
//!
//! Session lifecycle (create, validate with sliding expiry, revoke, sweep),
//! password login, and the idle-timeout watchdog that mirrors the server
//! timeout on the client side.

pub mod config;
pub mod crypto;
pub mod error;
pub mod idle;
pub mod password;
pub mod service;
pub mod session;

pub use config::SessionConfig;
pub use crypto::{generate_session_token, hash_token, is_well_formed_token, TOKEN_BYTES, TOKEN_LENGTH};
pub use error::AuthError;
pub use idle::{ActivityEvent, IdleTimer, IdleTimerHandle};
pub use password::{hash_password, verify_dummy_password, verify_password};
pub use service::{AuthService, LoginOutcome};
pub use session::{IssuedSession, SessionManager, ValidatedSession};
