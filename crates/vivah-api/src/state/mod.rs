//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the token verifier and configuration.

use std::sync::Arc;

use vivah_common::{AppConfig, TokenVerifier};
use vivah_db::PgPool;
use vivah_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
    verifier: Arc<TokenVerifier>,
    /// Present when backed by PostgreSQL; used by the readiness probe
    pool: Option<PgPool>,
}

impl AppState {
    pub fn new(service_context: ServiceContext, config: AppConfig, pool: Option<PgPool>) -> Self {
        let verifier = TokenVerifier::from_config(&config.auth);
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            verifier: Arc::new(verifier),
            pool,
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .field("postgres", &self.pool.is_some())
            .finish()
    }
}
