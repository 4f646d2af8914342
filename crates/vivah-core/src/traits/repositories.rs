//! Repository traits (ports) - define the interface for data access
//!
//! The document store behind these traits offers no transactions, so every
//! write that must be unique is expressed as an idempotent
//! "insert if absent by natural key" returning whichever record won.
//! Implementations map any I/O failure to `DomainError::StoreUnavailable`.

use async_trait::async_trait;

use crate::entities::{DisplayInfo, Like, Match, Notification, Profile};
use crate::error::DomainError;
use crate::value_objects::{PlanTier, RecordId, UserId, UserPair};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Outcome of an idempotent insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion<T> {
    /// The record did not exist and was written
    Created(T),
    /// A record with the same natural key already existed; it is returned unchanged
    Existing(T),
}

impl<T> Insertion<T> {
    #[inline]
    pub fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    pub fn record(&self) -> &T {
        match self {
            Self::Created(record) | Self::Existing(record) => record,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Created(record) | Self::Existing(record) => record,
        }
    }
}

// ============================================================================
// Like Repository
// ============================================================================

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Find the like for an ordered pair
    async fn find(&self, liker_id: &UserId, liked_id: &UserId) -> RepoResult<Option<Like>>;

    /// Persist a like unless one already exists for `(liker_id, liked_id)`
    async fn insert_if_absent(&self, like: &Like) -> RepoResult<Insertion<Like>>;

    /// Likes received by a user, newest first
    async fn find_received(&self, liked_id: &UserId, limit: i64) -> RepoResult<Vec<Like>>;

    /// Likes sent by a user, newest first
    async fn find_sent(&self, liker_id: &UserId, limit: i64) -> RepoResult<Vec<Like>>;
}

// ============================================================================
// Match Repository
// ============================================================================

#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Find the match for an unordered pair
    async fn find_by_pair(&self, pair: &UserPair) -> RepoResult<Option<Match>>;

    /// Persist a match unless one already exists for its pair
    async fn insert_if_absent(&self, matched: &Match) -> RepoResult<Insertion<Match>>;

    /// Matches a user is part of, newest first
    async fn find_by_user(&self, user_id: &UserId, limit: i64) -> RepoResult<Vec<Match>>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Persist a notification unless one exists for `(recipient_id, kind, source_id)`
    async fn insert_if_absent(
        &self,
        notification: &Notification,
    ) -> RepoResult<Insertion<Notification>>;

    /// Find a notification owned by `recipient_id`
    async fn find(&self, recipient_id: &UserId, id: RecordId) -> RepoResult<Option<Notification>>;

    /// Notifications for a recipient, newest first
    async fn find_by_recipient(
        &self,
        recipient_id: &UserId,
        unread_only: bool,
        limit: i64,
    ) -> RepoResult<Vec<Notification>>;

    /// Mark one notification read; returns false if the recipient does not own it
    async fn mark_read(&self, recipient_id: &UserId, id: RecordId) -> RepoResult<bool>;

    /// Mark every notification of a recipient read; returns how many changed
    async fn mark_all_read(&self, recipient_id: &UserId) -> RepoResult<u64>;

    /// Count unread notifications
    async fn unread_count(&self, recipient_id: &UserId) -> RepoResult<i64>;
}

// ============================================================================
// Profile Repository (read-only, owned by the profile service)
// ============================================================================

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Full profile including contact details
    async fn find_profile(&self, user_id: &UserId) -> RepoResult<Option<Profile>>;

    /// Display fields only
    async fn find_display_info(&self, user_id: &UserId) -> RepoResult<Option<DisplayInfo>>;
}

// ============================================================================
// Plan Repository (read-only, written by the payment approval workflow)
// ============================================================================

#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Current plan of a user; `None` when the workflow has never recorded one
    async fn find_plan(&self, user_id: &UserId) -> RepoResult<Option<PlanTier>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_accessors() {
        let created = Insertion::Created(5);
        let existing = Insertion::Existing(6);
        assert!(created.was_created());
        assert!(!existing.was_created());
        assert_eq!(*existing.record(), 6);
        assert_eq!(created.into_inner(), 5);
    }
}
