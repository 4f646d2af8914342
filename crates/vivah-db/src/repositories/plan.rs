//! PostgreSQL implementation of PlanRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vivah_core::traits::{PlanRepository, RepoResult};
use vivah_core::{DomainError, PlanTier, UserId};

use super::error::map_db_error;

/// Read-only access to plans recorded by the payment approval workflow
#[derive(Clone)]
pub struct PgPlanRepository {
    pool: PgPool,
}

impl PgPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepository for PgPlanRepository {
    #[instrument(skip(self))]
    async fn find_plan(&self, user_id: &UserId) -> RepoResult<Option<PlanTier>> {
        let stored = sqlx::query_scalar::<_, String>(
            r#"
            SELECT plan FROM user_plans WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        stored
            .map(|plan| {
                plan.parse::<PlanTier>()
                    .map_err(|e| DomainError::InternalError(e.to_string()))
            })
            .transpose()
    }
}
