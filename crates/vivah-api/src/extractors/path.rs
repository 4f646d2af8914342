//! Path parameter extractors

use serde::Deserialize;
use vivah_core::{RecordId, UserId};

use crate::response::ApiError;

/// Path parameters with user_id
#[derive(Debug, Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    /// Parse user_id, rejecting blank ids
    pub fn user_id(&self) -> Result<UserId, ApiError> {
        UserId::parse(&self.user_id).map_err(|_| ApiError::invalid_path("Invalid user_id"))
    }
}

/// Path parameters with notification_id
#[derive(Debug, Deserialize)]
pub struct NotificationIdPath {
    pub notification_id: String,
}

impl NotificationIdPath {
    pub fn notification_id(&self) -> Result<RecordId, ApiError> {
        self.notification_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid notification_id format"))
    }
}
