//! Domain entities - core business objects

mod like;
mod notification;
mod pair_state;
mod profile;
mod user_match;

pub use like::Like;
pub use notification::{Notification, NotificationKind, NotificationPayload};
pub use pair_state::PairState;
pub use profile::{ContactDetails, DisplayInfo, MatchSummary, Profile, ProfileBasics, ProfileRecord};
pub use user_match::Match;
