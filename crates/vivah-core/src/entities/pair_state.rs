//! Like → match state of a pair of users

use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// State of the relationship between two users
///
/// `Mutual` is terminal and is reached the same way whichever side likes second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PairState {
    NoLike,
    OneSided { liker: UserId, liked: UserId },
    Mutual,
}

impl PairState {
    /// Derive the state from which directional likes exist between `a` and `b`
    pub fn from_likes(a: &UserId, b: &UserId, a_likes_b: bool, b_likes_a: bool) -> Self {
        match (a_likes_b, b_likes_a) {
            (true, true) => Self::Mutual,
            (true, false) => Self::OneSided {
                liker: a.clone(),
                liked: b.clone(),
            },
            (false, true) => Self::OneSided {
                liker: b.clone(),
                liked: a.clone(),
            },
            (false, false) => Self::NoLike,
        }
    }

    #[inline]
    pub fn is_mutual(&self) -> bool {
        matches!(self, Self::Mutual)
    }
}
