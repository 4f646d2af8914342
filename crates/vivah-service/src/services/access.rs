//! Access service
//!
//! Resolves the viewer's plan and runs profile and match reads through the
//! access gate. A missing plan means free. A failed plan lookup is an
//! error and never falls back to either tier.

use tracing::{debug, instrument};
use vivah_core::{
    visible_match_list, AccessContext, DomainError, MatchListView, PlanTier, ProfileRecord,
    RedactedProfile, UserId,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::matches::MatchService;

pub struct AccessService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccessService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn viewer_context(&self, viewer: &UserId) -> ServiceResult<AccessContext> {
        let plan = match self.ctx.plan_repo().find_plan(viewer).await? {
            Some(plan) => plan,
            None => {
                debug!("No plan recorded, treating viewer as free");
                PlanTier::Free
            }
        };
        Ok(AccessContext::new(plan))
    }

    /// A profile as `viewer` is allowed to see it
    ///
    /// The match list is the target's own only when viewers look at
    /// themselves; other profiles carry an empty list through the gate.
    #[instrument(skip(self))]
    pub async fn view_profile(
        &self,
        viewer: &UserId,
        target: &UserId,
        match_limit: i64,
    ) -> ServiceResult<RedactedProfile> {
        let access = self.viewer_context(viewer).await?;
        let profile = self
            .ctx
            .profile_repo()
            .find_profile(target)
            .await?
            .ok_or_else(|| DomainError::ProfileNotFound(target.clone()))?;

        let matches = if viewer == target && access.viewer_plan.is_premium() {
            MatchService::new(self.ctx).summaries(target, match_limit).await?
        } else {
            Vec::new()
        };

        Ok(access.redact(&ProfileRecord::new(profile, matches)))
    }

    /// The viewer's own matches, gated by plan
    #[instrument(skip(self))]
    pub async fn list_matches(&self, viewer: &UserId, limit: i64) -> ServiceResult<MatchListView> {
        let access = self.viewer_context(viewer).await?;
        if !access.viewer_plan.is_premium() {
            return Ok(visible_match_list(access.viewer_plan, Vec::new()));
        }

        let summaries = MatchService::new(self.ctx).summaries(viewer, limit).await?;
        Ok(access.gate_matches(summaries))
    }
}
