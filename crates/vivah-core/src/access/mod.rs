//! Access gate - plan-based redaction of contact data and match lists
//!
//! Pure functions, no I/O.

mod gate;
mod mask;

pub use gate::{
    visible_fields, visible_match_list, AccessContext, ContactView, MatchListView,
    RedactedProfile, UpsellPrompt,
};
pub use mask::mask_contact;
