//! Application state

use std::sync::Arc;

use creohub_auth_core::AuthService;
use creohub_db::pg::{PgSessionRepository, PgUserRepository, Repositories};
use creohub_db::DbPool;
use creohub_pricing_core::PricingService;

use crate::config::Config;

/// Auth service over the Postgres repositories
pub type AuthServiceImpl = AuthService<PgUserRepository, PgSessionRepository>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Login and session management
    pub auth: Arc<AuthServiceImpl>,
    /// Currency and plan resolver
    pub pricing: Arc<PricingService>,
    /// Database repositories
    pub repos: Repositories,
    /// Database connection pool, used by the readiness check
    pub pool: DbPool,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        auth: AuthServiceImpl,
        pricing: PricingService,
        repos: Repositories,
        pool: DbPool,
        config: Config,
    ) -> Self {
        Self {
            auth: Arc::new(auth),
            pricing: Arc::new(pricing),
            repos,
            pool,
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}
