//! Notification emitter
//!
//! Best-effort fan-out of like and match notifications. Each delivery is
//! retried under the context's [`RetryPolicy`](super::RetryPolicy) and is
//! idempotent on `(recipient, kind, source_id)`, so re-emitting after a
//! partial failure never duplicates. Failures are returned, never raised
//! into the like/match write that triggered them.

use tracing::{debug, info, instrument, warn};
use vivah_core::{
    DisplayInfo, DomainError, Insertion, Like, Match, Notification, NotificationKind,
};

use super::context::ServiceContext;

/// Outcome of one delivery
pub type Delivery = Result<Insertion<Notification>, DomainError>;

pub struct NotificationEmitter<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationEmitter<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Notify the liked user, describing the liker
    #[instrument(skip(self, like, liker_display), fields(like_id = %like.id))]
    pub async fn emit_like_notification(&self, like: &Like, liker_display: DisplayInfo) -> Delivery {
        let notification = Notification::new(
            self.ctx.generate_id(),
            like.liked_id.clone(),
            NotificationKind::Like,
            like.id,
            liker_display,
        );
        self.deliver(notification).await
    }

    /// Notify both parties of a match, each about the other
    ///
    /// The two display records may be passed in either order; each is routed
    /// by its `user_id`. Deliveries run concurrently and fail independently.
    #[instrument(skip(self, matched, first, second), fields(match_id = %matched.id))]
    pub async fn emit_match_notification(
        &self,
        matched: &Match,
        first: DisplayInfo,
        second: DisplayInfo,
    ) -> [Delivery; 2] {
        let (about_a, about_b) = if first.user_id == matched.user_b_id {
            (second, first)
        } else {
            (first, second)
        };

        let to_a = Notification::new(
            self.ctx.generate_id(),
            matched.user_a_id.clone(),
            NotificationKind::Match,
            matched.id,
            about_b,
        );
        let to_b = Notification::new(
            self.ctx.generate_id(),
            matched.user_b_id.clone(),
            NotificationKind::Match,
            matched.id,
            about_a,
        );

        let (a, b) = tokio::join!(self.deliver(to_a), self.deliver(to_b));
        [a, b]
    }

    async fn deliver(&self, notification: Notification) -> Delivery {
        let repo = self.ctx.notification_repo();
        let pending = &notification;
        let result = self
            .ctx
            .retry_policy()
            .run("notification.insert", move || repo.insert_if_absent(pending))
            .await;

        match result {
            Ok(Insertion::Created(stored)) => {
                info!(
                    notification_id = %stored.id,
                    recipient = %stored.recipient_id,
                    kind = %stored.kind,
                    "Notification delivered"
                );
                Ok(Insertion::Created(stored))
            }
            Ok(Insertion::Existing(stored)) => {
                debug!(notification_id = %stored.id, "Notification already delivered");
                Ok(Insertion::Existing(stored))
            }
            Err(e) => {
                warn!(
                    recipient = %notification.recipient_id,
                    kind = %notification.kind,
                    source_id = %notification.source_id,
                    error = %e,
                    "Notification delivery failed"
                );
                Err(DomainError::NotificationDeliveryFailed {
                    recipient: notification.recipient_id,
                    kind: notification.kind,
                    reason: e.to_string(),
                })
            }
        }
    }
}
