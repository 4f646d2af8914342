//! Like entity - a one-directional expression of interest

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{RecordId, UserId};

/// Like entity
///
/// At most one per ordered `(liker_id, liked_id)`; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub id: RecordId,
    pub liker_id: UserId,
    pub liked_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Like {
    /// Create a new Like
    ///
    /// # Errors
    /// Returns `InvalidSelfAction` if a user tries to like their own profile
    pub fn new(id: RecordId, liker_id: UserId, liked_id: UserId) -> Result<Self, DomainError> {
        if liker_id == liked_id {
            return Err(DomainError::InvalidSelfAction(liker_id));
        }
        Ok(Self {
            id,
            liker_id,
            liked_id,
            created_at: Utc::now(),
        })
    }
}
