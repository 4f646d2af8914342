//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Query DTOs with validation for list endpoints
//! - Response DTOs for serializing API outputs
//! - Mappers from service results to responses

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{ListQuery, NotificationListQuery, DEFAULT_LIST_LIMIT};

pub use responses::{
    ApiResponse, HealthChecks, HealthResponse, LikeEntryResponse, LikeResponse,
    MarkAllReadResponse, MatchResponse, NotificationResponse, ReadinessResponse,
    ReconcileResponse, UnreadCountResponse,
};
