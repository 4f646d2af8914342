//! # vivah-service
//!
//! Application layer: the like pipeline and the services it is built from,
//! the notification inbox, gated profile reads, and the DTOs served by the API.

pub mod dto;
pub mod services;

pub use services::{
    AccessService, Acknowledgement, LikeOutcome, LikePipeline, LikeRecord, LikeService,
    LikeStatus, MatchResult, MatchService, MutualMatchDetector, NotificationEmitter,
    NotificationService, ReconcileReport, RetryPolicy, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult,
};
