//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Record ids are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use vivah_core::{DisplayInfo, NotificationKind, PairState};

use crate::services::{Acknowledgement, LikeStatus};

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Like Responses
// ============================================================================

/// Result of `POST /profiles/:user_id/likes`
#[derive(Debug, Clone, Serialize)]
pub struct LikeResponse {
    pub like_id: String,
    pub liker_id: String,
    pub liked_id: String,
    pub status: LikeStatus,
    /// What the client should show: "like sent" or "it's a match"
    pub acknowledgement: Acknowledgement,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub matched: Option<MatchResponse>,
    /// True when some notification could not be delivered yet
    pub notifications_pending: bool,
}

/// One entry of a received/sent like listing
#[derive(Debug, Clone, Serialize)]
pub struct LikeEntryResponse {
    pub id: String,
    pub liker_id: String,
    pub liked_id: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Match Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub id: String,
    pub user_a_id: String,
    pub user_b_id: String,
    pub created_at: DateTime<Utc>,
    /// False when the match already existed
    pub created: bool,
}

/// Result of a pair reconciliation
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileResponse {
    pub state: PairState,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub matched: Option<MatchResponse>,
    pub notifications_created: usize,
    pub notifications_failed: usize,
}

// ============================================================================
// Notification Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub kind: NotificationKind,
    pub source_id: String,
    pub other: DisplayInfo,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct UnreadCountResponse {
    pub unread: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing store
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
