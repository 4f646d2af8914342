//! Repository traits (ports)

mod repositories;

pub use repositories::{
    Insertion, LikeRepository, MatchRepository, NotificationRepository, PlanRepository,
    ProfileRepository, RepoResult,
};
