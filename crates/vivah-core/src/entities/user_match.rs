//! Match entity - two users who have liked each other

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{RecordId, UserId, UserPair};

/// Confirmed mutual match
///
/// `user_a_id` is always the lexicographically smaller id of the pair, so the
/// same two users always produce the same `(user_a_id, user_b_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: RecordId,
    pub user_a_id: UserId,
    pub user_b_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// Create a new Match for the pair
    pub fn new(id: RecordId, pair: &UserPair) -> Self {
        Self {
            id,
            user_a_id: pair.low().clone(),
            user_b_id: pair.high().clone(),
            created_at: Utc::now(),
        }
    }

    /// The unordered pair this match belongs to
    ///
    /// # Errors
    /// Returns `InvalidSelfAction` if the stored record is corrupt (same user on both sides)
    pub fn pair(&self) -> Result<UserPair, DomainError> {
        UserPair::new(self.user_a_id.clone(), self.user_b_id.clone())
    }

    #[inline]
    pub fn involves(&self, user_id: &UserId) -> bool {
        &self.user_a_id == user_id || &self.user_b_id == user_id
    }

    /// The other party from `user_id`'s point of view
    pub fn other_party(&self, user_id: &UserId) -> Option<&UserId> {
        if &self.user_a_id == user_id {
            Some(&self.user_b_id)
        } else if &self.user_b_id == user_id {
            Some(&self.user_a_id)
        } else {
            None
        }
    }
}
