//! User identity and unordered user pairs
//!
//! User ids are opaque strings handed to us by the external auth provider.
//! We never parse or validate them beyond rejecting blanks.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Opaque user identifier issued by the external auth provider
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap a raw identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the raw identifier
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Parse a user id, rejecting empty or whitespace-only input
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::ValidationError(
                "user id must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Unordered pair of two distinct users
///
/// Stored sorted so `{a, b}` and `{b, a}` compare and hash equal. This is the
/// natural key of a match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserPair {
    low: UserId,
    high: UserId,
}

impl UserPair {
    /// Build a pair from two users in any order
    ///
    /// # Errors
    /// Returns `InvalidSelfAction` when both sides are the same user
    pub fn new(first: UserId, second: UserId) -> Result<Self, DomainError> {
        match first.cmp(&second) {
            std::cmp::Ordering::Less => Ok(Self {
                low: first,
                high: second,
            }),
            std::cmp::Ordering::Greater => Ok(Self {
                low: second,
                high: first,
            }),
            std::cmp::Ordering::Equal => Err(DomainError::InvalidSelfAction(first)),
        }
    }

    /// Lexicographically smaller member
    pub fn low(&self) -> &UserId {
        &self.low
    }

    /// Lexicographically larger member
    pub fn high(&self) -> &UserId {
        &self.high
    }

    /// Check if the user is one side of the pair
    pub fn contains(&self, user_id: &UserId) -> bool {
        &self.low == user_id || &self.high == user_id
    }

    /// The member that is not `user_id`, if `user_id` belongs to the pair
    pub fn other(&self, user_id: &UserId) -> Option<&UserId> {
        if &self.low == user_id {
            Some(&self.high)
        } else if &self.high == user_id {
            Some(&self.low)
        } else {
            None
        }
    }
}

impl fmt::Display for UserPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.low, self.high)
    }
}
