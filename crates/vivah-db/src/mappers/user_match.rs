//! Match entity <-> model mapper

use vivah_core::{Match, RecordId, UserId};

use crate::models::MatchModel;

impl From<MatchModel> for Match {
    fn from(model: MatchModel) -> Self {
        Match {
            id: RecordId::new(model.id),
            user_a_id: UserId::new(model.user_low),
            user_b_id: UserId::new(model.user_high),
            created_at: model.created_at,
        }
    }
}
