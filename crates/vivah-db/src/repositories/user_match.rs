//! PostgreSQL implementation of MatchRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vivah_core::traits::{Insertion, MatchRepository, RepoResult};
use vivah_core::{Match, UserId, UserPair};

use crate::models::MatchModel;

use super::error::{conflict_row_missing, map_db_error};

/// PostgreSQL implementation of MatchRepository
#[derive(Clone)]
pub struct PgMatchRepository {
    pool: PgPool,
}

impl PgMatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchRepository for PgMatchRepository {
    #[instrument(skip(self, pair), fields(pair = %pair))]
    async fn find_by_pair(&self, pair: &UserPair) -> RepoResult<Option<Match>> {
        let result = sqlx::query_as::<_, MatchModel>(
            r#"
            SELECT id, user_low, user_high, created_at
            FROM matches
            WHERE user_low = $1 AND user_high = $2
            "#,
        )
        .bind(pair.low().as_str())
        .bind(pair.high().as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Match::from))
    }

    #[instrument(skip(self, matched), fields(match_id = %matched.id))]
    async fn insert_if_absent(&self, matched: &Match) -> RepoResult<Insertion<Match>> {
        let pair = matched.pair()?;

        let inserted = sqlx::query_as::<_, MatchModel>(
            r#"
            INSERT INTO matches (id, user_low, user_high, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_low, user_high) DO NOTHING
            RETURNING id, user_low, user_high, created_at
            "#,
        )
        .bind(matched.id.into_inner())
        .bind(pair.low().as_str())
        .bind(pair.high().as_str())
        .bind(matched.created_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if let Some(model) = inserted {
            return Ok(Insertion::Created(Match::from(model)));
        }

        self.find_by_pair(&pair)
            .await?
            .map(Insertion::Existing)
            .ok_or_else(|| conflict_row_missing("matches"))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: &UserId, limit: i64) -> RepoResult<Vec<Match>> {
        let results = sqlx::query_as::<_, MatchModel>(
            r#"
            SELECT id, user_low, user_high, created_at
            FROM matches
            WHERE user_low = $1 OR user_high = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(limit.clamp(1, 100))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Match::from).collect())
    }
}
