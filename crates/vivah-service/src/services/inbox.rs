//! Notification inbox service
//!
//! Read side of notifications. Only the recipient may read or mark its
//! notifications; another user's id behaves as not found.

use tracing::{info, instrument};
use vivah_core::{DomainError, Notification, RecordId, UserId};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Notifications for `recipient`, newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        recipient: &UserId,
        unread_only: bool,
        limit: i64,
    ) -> ServiceResult<Vec<Notification>> {
        Ok(self
            .ctx
            .notification_repo()
            .find_by_recipient(recipient, unread_only, limit)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn unread_count(&self, recipient: &UserId) -> ServiceResult<i64> {
        Ok(self.ctx.notification_repo().unread_count(recipient).await?)
    }

    /// Mark one notification read and return it
    #[instrument(skip(self))]
    pub async fn mark_read(&self, recipient: &UserId, id: RecordId) -> ServiceResult<Notification> {
        let repo = self.ctx.notification_repo();
        if !repo.mark_read(recipient, id).await? {
            return Err(DomainError::NotificationNotFound(id).into());
        }

        let notification = repo
            .find(recipient, id)
            .await?
            .ok_or(DomainError::NotificationNotFound(id))?;

        info!(notification_id = %id, "Notification marked read");
        Ok(notification)
    }

    /// Mark all of the recipient's notifications read; returns how many changed
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, recipient: &UserId) -> ServiceResult<u64> {
        let changed = self.ctx.notification_repo().mark_all_read(recipient).await?;
        info!(changed, "Notifications marked read");
        Ok(changed)
    }
}
