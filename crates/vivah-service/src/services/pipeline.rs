//! Like pipeline
//!
//! `like` runs the full flow for one viewer action:
//!
//! 1. record the like (idempotent per ordered pair)
//! 2. check whether the reverse like exists
//! 3. if mutual, create the match (idempotent per unordered pair)
//! 4. emit notifications
//!
//! Steps 1 and 3 commit or fail the call. Step 4 is best-effort: its
//! failures are reported in the outcome and can be repaired with
//! `reconcile_pair` or by liking again.
//!
//! A like that completes a match notifies both parties with `match`
//! notifications only. Match notifications are emitted by whichever call
//! created the match, or again by a repeated like, so concurrent likes
//! produce exactly two.

use serde::Serialize;
use tracing::{info, instrument, warn};
use vivah_core::{DisplayInfo, DomainError, Like, PairState, UserId, UserPair};

use super::context::ServiceContext;
use super::detector::MutualMatchDetector;
use super::emitter::{Delivery, NotificationEmitter};
use super::error::ServiceResult;
use super::like::{LikeService, LikeStatus};
use super::matches::{MatchResult, MatchService};

/// What the UI should acknowledge after a like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Acknowledgement {
    LikeSent,
    Matched,
}

/// Result of one like action
#[derive(Debug)]
pub struct LikeOutcome {
    pub like: Like,
    pub status: LikeStatus,
    /// Present when the pair is mutual
    pub matched: Option<MatchResult>,
    /// Notifications that could not be delivered; the like and match stand
    pub notification_failures: Vec<DomainError>,
}

impl LikeOutcome {
    pub fn acknowledgement(&self) -> Acknowledgement {
        if self.matched.is_some() {
            Acknowledgement::Matched
        } else {
            Acknowledgement::LikeSent
        }
    }

    #[inline]
    pub fn is_mutual(&self) -> bool {
        self.matched.is_some()
    }
}

/// Result of re-deriving a pair's state and repairing its side effects
#[derive(Debug)]
pub struct ReconcileReport {
    pub state: PairState,
    pub matched: Option<MatchResult>,
    /// Notifications written by this call (previously missing)
    pub notifications_created: usize,
    pub notification_failures: Vec<DomainError>,
}

pub struct LikePipeline<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LikePipeline<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// `liker` likes `liked`
    ///
    /// # Errors
    /// - `InvalidSelfAction` when both ids are equal, before any read or write
    /// - `ProfileNotFound` when `liked` has no profile
    /// - `StoreUnavailable` when the like, the mutual check or the match write fails
    #[instrument(skip(self))]
    pub async fn like(&self, liker: &UserId, liked: &UserId) -> ServiceResult<LikeOutcome> {
        if liker == liked {
            return Err(DomainError::InvalidSelfAction(liker.clone()).into());
        }

        let target = self
            .ctx
            .profile_repo()
            .find_profile(liked)
            .await?
            .ok_or_else(|| DomainError::ProfileNotFound(liked.clone()))?;

        let record = LikeService::new(self.ctx).record_like(liker, liked).await?;
        let mutual = MutualMatchDetector::new(self.ctx)
            .check_mutual(liker, liked)
            .await?;

        let matches = MatchService::new(self.ctx);
        let emitter = NotificationEmitter::new(self.ctx);
        let liker_display = matches.display_info(liker).await;
        let mut failures = Vec::new();

        let matched = if mutual {
            let result = matches.create_match_if_absent(liker, liked).await?;
            if result.created || !record.is_new() {
                let deliveries = emitter
                    .emit_match_notification(&result.matched, liker_display, target.display_info())
                    .await;
                collect_failures(deliveries, &mut failures, &mut 0);
            }
            Some(result)
        } else {
            let delivery = emitter.emit_like_notification(&record.like, liker_display).await;
            collect_failures([delivery], &mut failures, &mut 0);
            None
        };

        if !failures.is_empty() {
            warn!(failed = failures.len(), "Like committed with undelivered notifications");
        }

        Ok(LikeOutcome {
            like: record.like,
            status: record.status,
            matched,
            notification_failures: failures,
        })
    }

    /// Re-derive the pair's state and repair anything a crash or failed
    /// delivery left behind
    ///
    /// Creates a missing match for a mutual pair and re-emits the match
    /// notifications, or re-emits the like notification for a one-sided
    /// pair. Everything is idempotent, so running it on a healthy pair
    /// changes nothing.
    #[instrument(skip(self))]
    pub async fn reconcile_pair(&self, user1: &UserId, user2: &UserId) -> ServiceResult<ReconcileReport> {
        UserPair::new(user1.clone(), user2.clone())?;
        let matches = MatchService::new(self.ctx);
        let emitter = NotificationEmitter::new(self.ctx);
        let state = matches.pair_state(user1, user2).await?;

        let mut failures = Vec::new();
        let mut created = 0;
        let mut matched = None;

        match &state {
            PairState::NoLike => {}
            PairState::OneSided { liker, liked } => {
                if let Some(like) = self.ctx.like_repo().find(liker, liked).await? {
                    let delivery = emitter
                        .emit_like_notification(&like, matches.display_info(liker).await)
                        .await;
                    collect_failures([delivery], &mut failures, &mut created);
                }
            }
            PairState::Mutual => {
                let result = matches.create_match_if_absent(user1, user2).await?;
                let (first, second) = tokio::join!(matches.display_info(user1), matches.display_info(user2));
                let deliveries = emitter
                    .emit_match_notification(&result.matched, first, second)
                    .await;
                collect_failures(deliveries, &mut failures, &mut created);
                matched = Some(result);
            }
        }

        info!(
            state = ?state,
            notifications_created = created,
            failed = failures.len(),
            "Pair reconciled"
        );

        Ok(ReconcileReport {
            state,
            matched,
            notifications_created: created,
            notification_failures: failures,
        })
    }
}

fn collect_failures<const N: usize>(
    deliveries: [Delivery; N],
    failures: &mut Vec<DomainError>,
    created: &mut usize,
) {
    for delivery in deliveries {
        match delivery {
            Ok(insertion) if insertion.was_created() => *created += 1,
            Ok(_) => {}
            Err(e) => failures.push(e),
        }
    }
}
