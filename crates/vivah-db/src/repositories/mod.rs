//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in vivah-core.

mod error;
mod like;
mod notification;
mod plan;
mod profile;
mod user_match;

pub use like::PgLikeRepository;
pub use notification::PgNotificationRepository;
pub use plan::PgPlanRepository;
pub use profile::PgProfileRepository;
pub use user_match::PgMatchRepository;
