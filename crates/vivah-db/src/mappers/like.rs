//! Like entity <-> model mapper

use vivah_core::{Like, RecordId, UserId};

use crate::models::LikeModel;

impl From<LikeModel> for Like {
    fn from(model: LikeModel) -> Self {
        Like {
            id: RecordId::new(model.id),
            liker_id: UserId::new(model.liker_id),
            liked_id: UserId::new(model.liked_id),
            created_at: model.created_at,
        }
    }
}
