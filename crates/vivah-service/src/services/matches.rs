//! Match service
//!
//! Idempotent match creation keyed by the unordered user pair, pair state
//! and match listings.

use tracing::{debug, info, instrument, warn};
use vivah_core::{DisplayInfo, Insertion, Match, MatchSummary, PairState, UserId, UserPair};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Match plus whether this call created it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub matched: Match,
    pub created: bool,
}

/// Match service
pub struct MatchService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MatchService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Return the match for the pair, creating it if absent
    ///
    /// Argument order does not matter. Concurrent callers for the same pair
    /// all receive the same match and exactly one sees `created = true`.
    #[instrument(skip(self))]
    pub async fn create_match_if_absent(
        &self,
        user1: &UserId,
        user2: &UserId,
    ) -> ServiceResult<MatchResult> {
        let pair = UserPair::new(user1.clone(), user2.clone())?;

        if let Some(existing) = self.ctx.match_repo().find_by_pair(&pair).await? {
            debug!(match_id = %existing.id, "Match already exists");
            return Ok(MatchResult {
                matched: existing,
                created: false,
            });
        }

        let candidate = Match::new(self.ctx.generate_id(), &pair);
        let result = match self.ctx.match_repo().insert_if_absent(&candidate).await? {
            Insertion::Created(matched) => {
                info!(match_id = %matched.id, pair = %pair, "Match created");
                MatchResult {
                    matched,
                    created: true,
                }
            }
            Insertion::Existing(matched) => {
                debug!(match_id = %matched.id, "Lost insert race to a concurrent match");
                MatchResult {
                    matched,
                    created: false,
                }
            }
        };

        Ok(result)
    }

    /// Like relationship between two users
    #[instrument(skip(self))]
    pub async fn pair_state(&self, user1: &UserId, user2: &UserId) -> ServiceResult<PairState> {
        UserPair::new(user1.clone(), user2.clone())?;
        let likes = self.ctx.like_repo();
        let (forward, reverse) =
            tokio::try_join!(likes.find(user1, user2), likes.find(user2, user1))?;

        Ok(PairState::from_likes(
            user1,
            user2,
            forward.is_some(),
            reverse.is_some(),
        ))
    }

    /// Matches of a user, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: &UserId, limit: i64) -> ServiceResult<Vec<Match>> {
        Ok(self.ctx.match_repo().find_by_user(user_id, limit).await?)
    }

    /// Matches of a user with the other party's display fields
    #[instrument(skip(self))]
    pub async fn summaries(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> ServiceResult<Vec<MatchSummary>> {
        let matches = self.list(user_id, limit).await?;
        let mut summaries = Vec::with_capacity(matches.len());

        for matched in matches {
            let Some(other) = matched.other_party(user_id).cloned() else {
                continue;
            };
            summaries.push(MatchSummary {
                match_id: matched.id,
                other: self.display_info(&other).await,
                matched_at: matched.created_at,
            });
        }

        Ok(summaries)
    }

    /// Display fields for a user, or bare ones when the profile is missing or unreadable
    pub async fn display_info(&self, user_id: &UserId) -> DisplayInfo {
        match self.ctx.profile_repo().find_display_info(user_id).await {
            Ok(Some(info)) => info,
            Ok(None) => DisplayInfo::bare(user_id.clone()),
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Display lookup failed, using bare info");
                DisplayInfo::bare(user_id.clone())
            }
        }
    }
}
