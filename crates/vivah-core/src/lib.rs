//! # vivah-core
//!
//! Domain layer for the like → mutual-match → notification → access-gating pipeline.
//! Holds entities, value objects, the access gate policy, and the repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod access;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use access::{
    mask_contact, visible_fields, visible_match_list, AccessContext, ContactView, MatchListView,
    RedactedProfile, UpsellPrompt,
};
pub use entities::{
    ContactDetails, DisplayInfo, Like, Match, MatchSummary, Notification, NotificationKind,
    NotificationPayload, PairState, Profile, ProfileBasics, ProfileRecord,
};
pub use error::DomainError;
pub use traits::{
    Insertion, LikeRepository, MatchRepository, NotificationRepository, PlanRepository,
    ProfileRepository, RepoResult,
};
pub use value_objects::{
    IdGenerator, PlanTier, PlanTierParseError, RecordId, RecordIdParseError, UserId, UserPair,
};
