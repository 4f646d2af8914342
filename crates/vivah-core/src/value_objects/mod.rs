//! Value objects - immutable types that represent domain concepts

mod plan;
mod record_id;
mod user_id;

pub use plan::{PlanTier, PlanTierParseError};
pub use record_id::{IdGenerator, RecordId, RecordIdParseError};
pub use user_id::{UserId, UserPair};
