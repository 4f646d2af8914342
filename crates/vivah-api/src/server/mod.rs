//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use vivah_common::{AppConfig, AppError};
use vivah_core::IdGenerator;
use vivah_db::{
    create_pool, run_migrations, PgLikeRepository, PgMatchRepository, PgNotificationRepository,
    PgPlanRepository, PgProfileRepository, PoolOptions,
};
use vivah_service::{RetryPolicy, ServiceContext, ServiceContextBuilder};

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes sit outside the rate limiter.
pub fn create_app(state: AppState) -> Router {
    let api = apply_middleware_with_config(
        create_router(),
        &state.config().rate_limit,
        &state.config().cors,
        state.config().app.env.is_production(),
    );

    api.merge(health_routes()).with_state(state)
}

/// Connect to PostgreSQL and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&config.database, &PoolOptions::default())
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    let service_context = ServiceContextBuilder::new()
        .like_repo(Arc::new(PgLikeRepository::new(pool.clone())))
        .match_repo(Arc::new(PgMatchRepository::new(pool.clone())))
        .notification_repo(Arc::new(PgNotificationRepository::new(pool.clone())))
        .profile_repo(Arc::new(PgProfileRepository::new(pool.clone())))
        .plan_repo(Arc::new(PgPlanRepository::new(pool.clone())))
        .id_generator(Arc::new(IdGenerator::new(config.ids.worker_id)))
        .retry_policy(RetryPolicy::from_config(&config.notifications))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, Some(pool)))
}

/// Create AppState around an already-built context (in-memory store, tests)
pub fn create_app_state_with_context(context: ServiceContext, config: AppConfig) -> AppState {
    AppState::new(context, config, None)
}

/// Run the HTTP server
pub async fn run_server(app: Router, address: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {address}: {e}")))?;

    info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();
    let state = create_app_state(config).await?;
    let app = create_app(state);
    run_server(app, &address).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
