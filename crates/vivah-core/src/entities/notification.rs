//! Notification entity - "someone liked you" / "you have a new match"

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::DisplayInfo;
use crate::error::DomainError;
use crate::value_objects::{RecordId, UserId};

/// Notification type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Match,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Match => "match",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "match" => Ok(Self::Match),
            other => Err(DomainError::ValidationError(format!(
                "unknown notification kind: {other}"
            ))),
        }
    }
}

/// What the recipient sees: the other party's display data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub other: DisplayInfo,
}

/// Notification entity
///
/// `source_id` is the like id (for `Like`) or match id (for `Match`).
/// `(recipient_id, kind, source_id)` is unique, which makes emission idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: RecordId,
    pub recipient_id: UserId,
    pub kind: NotificationKind,
    pub source_id: RecordId,
    pub payload: NotificationPayload,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create an unread notification
    pub fn new(
        id: RecordId,
        recipient_id: UserId,
        kind: NotificationKind,
        source_id: RecordId,
        other: DisplayInfo,
    ) -> Self {
        Self {
            id,
            recipient_id,
            kind,
            source_id,
            payload: NotificationPayload { other },
            read: false,
            created_at: Utc::now(),
        }
    }

    /// Uniqueness key: one notification per recipient, kind and source record
    pub fn event_key(&self) -> (UserId, NotificationKind, RecordId) {
        (self.recipient_id.clone(), self.kind, self.source_id)
    }

    #[inline]
    pub fn belongs_to(&self, user_id: &UserId) -> bool {
        &self.recipient_id == user_id
    }
}
