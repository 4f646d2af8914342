//! PostgreSQL connection pool and schema migrations

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;
use vivah_common::DatabaseConfig;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Pool tuning not exposed through `DatabaseConfig`
#[derive(Debug, Clone)]
pub struct PoolOptions {
    /// Maximum time to wait for a connection
    pub acquire_timeout: Duration,
    /// Maximum idle time before a connection is closed
    pub idle_timeout: Duration,
    /// Maximum lifetime of a connection
    pub max_lifetime: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// Create a new PostgreSQL connection pool
///
/// # Errors
/// Returns an error if the initial connection cannot be established
pub async fn create_pool(
    config: &DatabaseConfig,
    options: &PoolOptions,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(options.acquire_timeout)
        .idle_timeout(options.idle_timeout)
        .max_lifetime(options.max_lifetime)
        .connect(&config.url)
        .await
}

/// Apply the embedded migrations
///
/// # Errors
/// Returns an error if a migration fails or the applied history diverges
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!(count = MIGRATOR.iter().count(), "Database migrations applied");
    Ok(())
}
