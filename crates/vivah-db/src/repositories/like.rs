//! PostgreSQL implementation of LikeRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vivah_core::traits::{Insertion, LikeRepository, RepoResult};
use vivah_core::{Like, UserId};

use crate::models::LikeModel;

use super::error::{conflict_row_missing, map_db_error};

/// PostgreSQL implementation of LikeRepository
#[derive(Clone)]
pub struct PgLikeRepository {
    pool: PgPool,
}

impl PgLikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    #[instrument(skip(self))]
    async fn find(&self, liker_id: &UserId, liked_id: &UserId) -> RepoResult<Option<Like>> {
        let result = sqlx::query_as::<_, LikeModel>(
            r#"
            SELECT id, liker_id, liked_id, created_at
            FROM likes
            WHERE liker_id = $1 AND liked_id = $2
            "#,
        )
        .bind(liker_id.as_str())
        .bind(liked_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Like::from))
    }

    #[instrument(skip(self, like), fields(liker = %like.liker_id, liked = %like.liked_id))]
    async fn insert_if_absent(&self, like: &Like) -> RepoResult<Insertion<Like>> {
        let inserted = sqlx::query_as::<_, LikeModel>(
            r#"
            INSERT INTO likes (id, liker_id, liked_id, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (liker_id, liked_id) DO NOTHING
            RETURNING id, liker_id, liked_id, created_at
            "#,
        )
        .bind(like.id.into_inner())
        .bind(like.liker_id.as_str())
        .bind(like.liked_id.as_str())
        .bind(like.created_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if let Some(model) = inserted {
            return Ok(Insertion::Created(Like::from(model)));
        }

        self.find(&like.liker_id, &like.liked_id)
            .await?
            .map(Insertion::Existing)
            .ok_or_else(|| conflict_row_missing("likes"))
    }

    #[instrument(skip(self))]
    async fn find_received(&self, liked_id: &UserId, limit: i64) -> RepoResult<Vec<Like>> {
        let results = sqlx::query_as::<_, LikeModel>(
            r#"
            SELECT id, liker_id, liked_id, created_at
            FROM likes
            WHERE liked_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(liked_id.as_str())
        .bind(limit.clamp(1, 100))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Like::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_sent(&self, liker_id: &UserId, limit: i64) -> RepoResult<Vec<Like>> {
        let results = sqlx::query_as::<_, LikeModel>(
            r#"
            SELECT id, liker_id, liked_id, created_at
            FROM likes
            WHERE liker_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(liker_id.as_str())
        .bind(limit.clamp(1, 100))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Like::from).collect())
    }
}
