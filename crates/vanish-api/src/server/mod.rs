//! Server setup and initialization
//!
//! Provides the application builder, the storage bootstrap, and the server
//! runner that owns the expiry sweeper's lifecycle.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};
use vanish_common::{AppConfig, AppError};
use vanish_core::{SnowflakeGenerator, SystemClock};
use vanish_db::{create_pool, default_migrations_dir, run_migrations, DatabaseConfig, MemoryStore};
use vanish_service::{ExpirySweeper, ServiceContext, SweeperHandle};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );

    // Probes are merged after the middleware so they bypass rate limiting
    router.merge(health_routes()).with_state(state)
}

/// Connect storage and create AppState
///
/// Uses PostgreSQL (migrated on connect) when `DATABASE_URL` is set, and a
/// process-local store otherwise.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let clock = Arc::new(SystemClock);
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let service_context = match &config.database {
        Some(settings) => {
            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&DatabaseConfig::from(settings))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            run_migrations(&pool, default_migrations_dir())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("Database migrations applied");

            ServiceContext::postgres(pool, clock, snowflake_generator)
        }
        None => {
            warn!("DATABASE_URL not set, messages are kept in memory only");
            ServiceContext::in_memory(MemoryStore::new(), clock, snowflake_generator)
        }
    };

    Ok(AppState::new(service_context, config))
}

/// Start the expiry sweeper over the state's message store
pub fn spawn_sweeper(state: &AppState) -> SweeperHandle {
    ExpirySweeper::from_context(state.service_context(), state.config().sweeper.interval()).spawn()
}

/// Run the HTTP server until `shutdown` resolves
pub async fn run_server<F>(app: Router, addr: SocketAddr, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API_HOST/API_PORT: {e}")))?;

    let state = create_app_state(config).await?;
    let sweeper = spawn_sweeper(&state);

    let app = create_app(state);
    let result = run_server(app, addr, shutdown_signal()).await;

    sweeper.shutdown().await;
    info!("Server stopped");

    result
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        // Without a signal handler, run until the process is killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
