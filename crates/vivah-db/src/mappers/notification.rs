//! Notification entity <-> model mapper

use vivah_core::{DomainError, Notification, NotificationKind, RecordId, UserId};

use crate::models::NotificationModel;

/// The kind column is free text to the driver, so the conversion can fail
impl TryFrom<NotificationModel> for Notification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        let kind: NotificationKind = model
            .kind
            .parse()
            .map_err(|_| DomainError::InternalError(format!("stored kind '{}'", model.kind)))?;

        Ok(Notification {
            id: RecordId::new(model.id),
            recipient_id: UserId::new(model.recipient_id),
            kind,
            source_id: RecordId::new(model.source_id),
            payload: model.payload.0,
            read: model.read,
            created_at: model.created_at,
        })
    }
}
