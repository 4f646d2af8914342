//! Mutual-match detection

use tracing::{debug, instrument};
use vivah_core::UserId;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Answers whether a freshly persisted like is reciprocated
pub struct MutualMatchDetector<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MutualMatchDetector<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// True when `liked` has already liked `liker`
    ///
    /// Call only after the `liker -> liked` like is persisted. Two concurrent
    /// likes may both observe `true`; match creation absorbs that.
    #[instrument(skip(self))]
    pub async fn check_mutual(&self, liker: &UserId, liked: &UserId) -> ServiceResult<bool> {
        let reverse = self.ctx.like_repo().find(liked, liker).await?;
        debug!(mutual = reverse.is_some(), "Reverse like checked");
        Ok(reverse.is_some())
    }
}
