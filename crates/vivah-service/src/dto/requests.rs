//! Request DTOs for API endpoints
//!
//! Query strings deserialize into these and are checked with `Validate`
//! before reaching a service.

use serde::Deserialize;
use validator::Validate;

/// Page size used when the client does not send one
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// `?limit=` for like and match listings
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListQuery {
    #[validate(range(min = 1, max = 100, message = "Limit must be 1-100"))]
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT)
    }
}

/// `?limit=&unread_only=` for the notification inbox
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NotificationListQuery {
    #[validate(range(min = 1, max = 100, message = "Limit must be 1-100"))]
    pub limit: Option<i64>,

    #[serde(default)]
    pub unread_only: bool,
}

impl NotificationListQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT)
    }
}
