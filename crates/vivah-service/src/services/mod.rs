//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`]; the [`LikePipeline`]
//! sequences the others for a single like.

pub mod access;
pub mod context;
pub mod detector;
pub mod emitter;
pub mod error;
pub mod inbox;
pub mod like;
pub mod matches;
pub mod pipeline;
pub mod retry;

pub use access::AccessService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use detector::MutualMatchDetector;
pub use emitter::NotificationEmitter;
pub use error::{ServiceError, ServiceResult};
pub use inbox::NotificationService;
pub use like::{LikeRecord, LikeService, LikeStatus};
pub use matches::{MatchResult, MatchService};
pub use pipeline::{Acknowledgement, LikeOutcome, LikePipeline, ReconcileReport};
pub use retry::RetryPolicy;
