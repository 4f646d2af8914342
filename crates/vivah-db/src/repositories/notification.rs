//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use vivah_core::traits::{Insertion, NotificationRepository, RepoResult};
use vivah_core::{Notification, RecordId, UserId};

use crate::models::NotificationModel;

use super::error::{conflict_row_missing, map_db_error};

const COLUMNS: &str = "id, recipient_id, kind, source_id, payload, read, created_at";

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_event(&self, notification: &Notification) -> RepoResult<Option<Notification>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE recipient_id = $1 AND kind = $2 AND source_id = $3"
        );
        sqlx::query_as::<_, NotificationModel>(&sql)
            .bind(notification.recipient_id.as_str())
            .bind(notification.kind.as_str())
            .bind(notification.source_id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .map(Notification::try_from)
            .transpose()
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self, notification), fields(
        recipient = %notification.recipient_id,
        kind = %notification.kind,
        source_id = %notification.source_id,
    ))]
    async fn insert_if_absent(
        &self,
        notification: &Notification,
    ) -> RepoResult<Insertion<Notification>> {
        let sql = format!(
            "INSERT INTO notifications ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (recipient_id, kind, source_id) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, NotificationModel>(&sql)
            .bind(notification.id.into_inner())
            .bind(notification.recipient_id.as_str())
            .bind(notification.kind.as_str())
            .bind(notification.source_id.into_inner())
            .bind(Json(&notification.payload))
            .bind(notification.read)
            .bind(notification.created_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        if let Some(model) = inserted {
            return Ok(Insertion::Created(Notification::try_from(model)?));
        }

        self.find_event(notification)
            .await?
            .map(Insertion::Existing)
            .ok_or_else(|| conflict_row_missing("notifications"))
    }

    #[instrument(skip(self))]
    async fn find(&self, recipient_id: &UserId, id: RecordId) -> RepoResult<Option<Notification>> {
        let sql = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1 AND recipient_id = $2");
        sqlx::query_as::<_, NotificationModel>(&sql)
            .bind(id.into_inner())
            .bind(recipient_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .map(Notification::try_from)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_recipient(
        &self,
        recipient_id: &UserId,
        unread_only: bool,
        limit: i64,
    ) -> RepoResult<Vec<Notification>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE recipient_id = $1 AND ($2 = FALSE OR read = FALSE) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3"
        );
        let results = sqlx::query_as::<_, NotificationModel>(&sql)
            .bind(recipient_id.as_str())
            .bind(unread_only)
            .bind(limit.clamp(1, 100))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        results.into_iter().map(Notification::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, recipient_id: &UserId, id: RecordId) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE notifications SET read = TRUE
            WHERE id = $1 AND recipient_id = $2
            "#,
        )
        .bind(id.into_inner())
        .bind(recipient_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn mark_all_read(&self, recipient_id: &UserId) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE notifications SET read = TRUE
            WHERE recipient_id = $1 AND read = FALSE
            "#,
        )
        .bind(recipient_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn unread_count(&self, recipient_id: &UserId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM notifications
            WHERE recipient_id = $1 AND read = FALSE
            "#,
        )
        .bind(recipient_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
