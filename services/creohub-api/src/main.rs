//! Creohub API
//!
//! HTTP host for the session manager and the pricing resolver.
//!
//! ## Session Endpoints
//!
//! - `POST /api/auth/login` - Email/password login, returns a bearer token
//! - `POST /api/auth/logout` - Revoke the presented session
//! - `POST /api/auth/logout-all` - Revoke every session of the caller
//! - `GET /api/auth/session` - Current session (slides its expiry)
//! - `GET /api/auth/sessions` - Caller's sessions, newest first
//!
//! ## Pricing Endpoints
//!
//! - `GET /api/currencies` - Supported currency catalog
//! - `GET /api/currency/detect` - Display currency for this client
//! - `POST /api/currency/convert` - Convert and format an amount
//! - `GET /api/plans` - Plan catalog
//! - `GET /api/plans/{id}` - One plan
//! - `GET /api/entitlements` - Caller's plan entitlements
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe

mod config;
mod error;
mod extractors;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::connect_info::IntoMakeServiceWithConnectInfo;
use axum::routing::{get, post};
use axum::Router;
use creohub_auth_core::AuthService;
use creohub_db::pg::Repositories;
use creohub_pricing_core::PricingService;
use tokio::signal;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogFormat};
use crate::state::{AppState, AuthServiceImpl};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    init_tracing(config.log_format)?;

    tracing::info!("Starting Creohub API");
    tracing::info!(
        http_port = config.http_port,
        session_timeout_secs = config.session.timeout.as_secs(),
        "Configuration loaded"
    );

    // Create database pool and apply migrations
    let pool = creohub_db::create_pool(&config.database_url).await?;
    creohub_db::run_migrations(&pool).await?;
    tracing::info!("Database pool created");

    let repos = Repositories::new(pool.clone());

    let auth = AuthService::new(
        config.session.clone(),
        Arc::new(repos.users.clone()),
        Arc::new(repos.sessions.clone()),
    )?;
    let pricing = PricingService::from_config(&config.pricing)?;
    tracing::info!(pricing = ?pricing, "Pricing catalog ready");

    let state = AppState::new(auth, pricing, repos, pool, config.clone());

    let cleanup = spawn_session_cleanup(Arc::clone(&state.auth), config.session.cleanup_interval);

    let app = build_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let result = run_http_server(app, addr).await;

    cleanup.abort();
    tracing::info!("Shutdown complete");
    result
}

fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"))
        .add_directive("creohub_api=debug".parse()?);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
    Ok(())
}

/// Periodically deactivate sessions that expired without a logout
fn spawn_session_cleanup(auth: Arc<AuthServiceImpl>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = auth.cleanup_expired().await {
                tracing::warn!(error = %e, "Session cleanup failed, retrying next interval");
            }
        }
    })
}

fn build_router(state: AppState) -> Router {
    let request_timeout = state.request_timeout();

    let api = Router::new()
        // Session routes
        .route("/auth/login", post(handlers::login))
        .route("/auth/logout", post(handlers::logout))
        .route("/auth/logout-all", post(handlers::logout_all))
        .route("/auth/session", get(handlers::current_session))
        .route("/auth/sessions", get(handlers::list_sessions))
        // Currency routes
        .route("/currencies", get(handlers::list_currencies))
        .route("/currency/detect", get(handlers::detect_currency))
        .route("/currency/convert", post(handlers::convert_currency))
        // Plan routes
        .route("/plans", get(handlers::list_plans))
        .route("/plans/{id}", get(handlers::get_plan))
        .route("/entitlements", get(handlers::entitlements));

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready));

    // Build middleware stack (order matters - outermost first)
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(request_timeout));

    Router::new()
        .nest("/api", api)
        .layer(middleware)
        .merge(health_routes)
        .with_state(state)
}

async fn run_http_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let service: IntoMakeServiceWithConnectInfo<Router, SocketAddr> =
        app.into_make_service_with_connect_info();

    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
