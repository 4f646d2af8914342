//! Notification database model

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use vivah_core::NotificationPayload;

/// Database model for notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: i64,
    pub recipient_id: String,
    pub kind: String,
    pub source_id: i64,
    pub payload: Json<NotificationPayload>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
