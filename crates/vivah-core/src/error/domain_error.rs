//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::NotificationKind;
use crate::value_objects::{RecordId, UserId};

/// Domain layer errors
///
/// A duplicate like is deliberately not an error here: it is reported as
/// an `AlreadyLiked` outcome by the like store.
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("User {0} cannot act on their own profile")]
    InvalidSelfAction(UserId),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Profile not found: {0}")]
    ProfileNotFound(UserId),

    #[error("Notification not found: {0}")]
    NotificationNotFound(RecordId),

    // =========================================================================
    // Delivery Errors
    // =========================================================================
    #[error("Failed to deliver {kind} notification to {recipient}: {reason}")]
    NotificationDeliveryFailed {
        recipient: UserId,
        kind: NotificationKind,
        reason: String,
    },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSelfAction(_) => "INVALID_SELF_ACTION",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ProfileNotFound(_) => "UNKNOWN_PROFILE",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::NotificationDeliveryFailed { .. } => "NOTIFICATION_DELIVERY_FAILED",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProfileNotFound(_) | Self::NotificationNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidSelfAction(_) | Self::ValidationError(_))
    }

    /// Check if retrying the same call may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::StoreUnavailable(_) | Self::NotificationDeliveryFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::InvalidSelfAction(UserId::new("u1"));
        assert_eq!(err.code(), "INVALID_SELF_ACTION");

        let err = DomainError::StoreUnavailable("timeout".to_string());
        assert_eq!(err.code(), "STORE_UNAVAILABLE");
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::InvalidSelfAction(UserId::new("u1")).is_validation());
        assert!(DomainError::NotificationNotFound(RecordId::new(1)).is_not_found());
        assert!(DomainError::StoreUnavailable("down".to_string()).is_transient());
        assert!(!DomainError::ValidationError("bad".to_string()).is_transient());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::NotificationDeliveryFailed {
            recipient: UserId::new("bob"),
            kind: NotificationKind::Match,
            reason: "store down".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to deliver match notification to bob: store down"
        );
    }
}
