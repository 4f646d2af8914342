//! PostgreSQL implementation of ProfileRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vivah_core::traits::{ProfileRepository, RepoResult};
use vivah_core::{DisplayInfo, Profile, UserId};

use crate::models::{DisplayInfoModel, ProfileModel};

use super::error::map_db_error;

/// Read-only access to the profile service's table
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    #[instrument(skip(self))]
    async fn find_profile(&self, user_id: &UserId) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(
            r#"
            SELECT user_id, name, age, photos, bio, location, profession, phone, email
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Profile::from))
    }

    #[instrument(skip(self))]
    async fn find_display_info(&self, user_id: &UserId) -> RepoResult<Option<DisplayInfo>> {
        let result = sqlx::query_as::<_, DisplayInfoModel>(
            r#"
            SELECT user_id, name, photos[1] AS photo_url, age, location, profession
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(DisplayInfo::from))
    }
}
