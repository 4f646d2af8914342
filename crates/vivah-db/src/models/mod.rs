//! Database models - SQLx-compatible structs for PostgreSQL tables

mod like;
mod notification;
mod profile;
mod user_match;

pub use like::LikeModel;
pub use notification::NotificationModel;
pub use profile::{DisplayInfoModel, ProfileModel};
pub use user_match::MatchModel;
