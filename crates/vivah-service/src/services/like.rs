//! Like service
//!
//! Records one-directional likes and serves like listings.

use serde::Serialize;
use tracing::{debug, info, instrument};
use vivah_core::{DomainError, Insertion, Like, UserId};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Whether `record_like` wrote a new like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LikeStatus {
    Recorded,
    /// A like for the same ordered pair already existed; not an error
    AlreadyLiked,
}

/// The persisted like and how it got there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeRecord {
    pub like: Like,
    pub status: LikeStatus,
}

impl LikeRecord {
    #[inline]
    pub fn is_new(&self) -> bool {
        self.status == LikeStatus::Recorded
    }
}

/// Like service
pub struct LikeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LikeService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record `liker` liking `liked`
    ///
    /// A repeated like returns the original record with `AlreadyLiked`.
    #[instrument(skip(self))]
    pub async fn record_like(&self, liker: &UserId, liked: &UserId) -> ServiceResult<LikeRecord> {
        if liker == liked {
            return Err(DomainError::InvalidSelfAction(liker.clone()).into());
        }

        if let Some(existing) = self.ctx.like_repo().find(liker, liked).await? {
            debug!(like_id = %existing.id, "Like already present");
            return Ok(LikeRecord {
                like: existing,
                status: LikeStatus::AlreadyLiked,
            });
        }

        let like = Like::new(self.ctx.generate_id(), liker.clone(), liked.clone())?;
        let record = match self.ctx.like_repo().insert_if_absent(&like).await? {
            Insertion::Created(like) => {
                info!(like_id = %like.id, liker = %liker, liked = %liked, "Like recorded");
                LikeRecord {
                    like,
                    status: LikeStatus::Recorded,
                }
            }
            Insertion::Existing(like) => {
                debug!(like_id = %like.id, "Lost insert race to an identical like");
                LikeRecord {
                    like,
                    status: LikeStatus::AlreadyLiked,
                }
            }
        };

        Ok(record)
    }

    /// Likes the user has received, newest first
    #[instrument(skip(self))]
    pub async fn received(&self, user_id: &UserId, limit: i64) -> ServiceResult<Vec<Like>> {
        Ok(self.ctx.like_repo().find_received(user_id, limit).await?)
    }

    /// Likes the user has sent, newest first
    #[instrument(skip(self))]
    pub async fn sent(&self, user_id: &UserId, limit: i64) -> ServiceResult<Vec<Like>> {
        Ok(self.ctx.like_repo().find_sent(user_id, limit).await?)
    }
}
