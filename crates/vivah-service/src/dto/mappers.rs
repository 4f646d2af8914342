//! Service result to DTO mappers
//!
//! Implements `From` conversions from domain entities and service outcomes
//! to response DTOs.

use vivah_core::{Like, Notification};

use crate::services::{LikeOutcome, MatchResult, ReconcileReport};

use super::responses::{
    LikeEntryResponse, LikeResponse, MatchResponse, NotificationResponse, ReconcileResponse,
};

// ============================================================================
// Like Mappers
// ============================================================================

impl From<&Like> for LikeEntryResponse {
    fn from(like: &Like) -> Self {
        Self {
            id: like.id.to_string(),
            liker_id: like.liker_id.to_string(),
            liked_id: like.liked_id.to_string(),
            created_at: like.created_at,
        }
    }
}

impl From<Like> for LikeEntryResponse {
    fn from(like: Like) -> Self {
        Self::from(&like)
    }
}

impl From<&LikeOutcome> for LikeResponse {
    fn from(outcome: &LikeOutcome) -> Self {
        Self {
            like_id: outcome.like.id.to_string(),
            liker_id: outcome.like.liker_id.to_string(),
            liked_id: outcome.like.liked_id.to_string(),
            status: outcome.status,
            acknowledgement: outcome.acknowledgement(),
            matched: outcome.matched.as_ref().map(MatchResponse::from),
            notifications_pending: !outcome.notification_failures.is_empty(),
        }
    }
}

// ============================================================================
// Match Mappers
// ============================================================================

impl From<&MatchResult> for MatchResponse {
    fn from(result: &MatchResult) -> Self {
        Self {
            id: result.matched.id.to_string(),
            user_a_id: result.matched.user_a_id.to_string(),
            user_b_id: result.matched.user_b_id.to_string(),
            created_at: result.matched.created_at,
            created: result.created,
        }
    }
}

impl From<&ReconcileReport> for ReconcileResponse {
    fn from(report: &ReconcileReport) -> Self {
        Self {
            state: report.state.clone(),
            matched: report.matched.as_ref().map(MatchResponse::from),
            notifications_created: report.notifications_created,
            notifications_failed: report.notification_failures.len(),
        }
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl From<&Notification> for NotificationResponse {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            kind: notification.kind,
            source_id: notification.source_id.to_string(),
            other: notification.payload.other.clone(),
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self::from(&notification)
    }
}
