//! Service context - dependency container for services
//!
//! Holds the repositories, the record id generator and the notification
//! retry policy.

use std::sync::Arc;

use vivah_core::traits::{
    LikeRepository, MatchRepository, NotificationRepository, PlanRepository, ProfileRepository,
};
use vivah_core::{IdGenerator, RecordId};

use super::error::{ServiceError, ServiceResult};
use super::retry::RetryPolicy;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    like_repo: Arc<dyn LikeRepository>,
    match_repo: Arc<dyn MatchRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    profile_repo: Arc<dyn ProfileRepository>,
    plan_repo: Arc<dyn PlanRepository>,
    id_generator: Arc<IdGenerator>,
    retry_policy: RetryPolicy,
}

impl ServiceContext {
    #[must_use]
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn like_repo(&self) -> &dyn LikeRepository {
        self.like_repo.as_ref()
    }

    pub fn match_repo(&self) -> &dyn MatchRepository {
        self.match_repo.as_ref()
    }

    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    /// Read-only; owned by the profile service
    pub fn profile_repo(&self) -> &dyn ProfileRepository {
        self.profile_repo.as_ref()
    }

    /// Read-only; written by the payment approval workflow
    pub fn plan_repo(&self) -> &dyn PlanRepository {
        self.plan_repo.as_ref()
    }

    // === Policies and generators ===

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    pub fn generate_id(&self) -> RecordId {
        self.id_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("id_generator", &self.id_generator)
            .field("retry_policy", &self.retry_policy)
            .finish()
    }
}

/// Builder for creating a ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    like_repo: Option<Arc<dyn LikeRepository>>,
    match_repo: Option<Arc<dyn MatchRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    profile_repo: Option<Arc<dyn ProfileRepository>>,
    plan_repo: Option<Arc<dyn PlanRepository>>,
    id_generator: Option<Arc<IdGenerator>>,
    retry_policy: Option<RetryPolicy>,
}

impl ServiceContextBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use one store for every repository
    #[must_use]
    pub fn store<S>(self, store: Arc<S>) -> Self
    where
        S: LikeRepository
            + MatchRepository
            + NotificationRepository
            + ProfileRepository
            + PlanRepository
            + 'static,
    {
        self.like_repo(store.clone())
            .match_repo(store.clone())
            .notification_repo(store.clone())
            .profile_repo(store.clone())
            .plan_repo(store)
    }

    #[must_use]
    pub fn like_repo(mut self, repo: Arc<dyn LikeRepository>) -> Self {
        self.like_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn match_repo(mut self, repo: Arc<dyn MatchRepository>) -> Self {
        self.match_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn profile_repo(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profile_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn plan_repo(mut self, repo: Arc<dyn PlanRepository>) -> Self {
        self.plan_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn id_generator(mut self, generator: Arc<IdGenerator>) -> Self {
        self.id_generator = Some(generator);
        self
    }

    #[must_use]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Build the ServiceContext
    ///
    /// The id generator defaults to worker 0 and the retry policy to
    /// [`RetryPolicy::default`].
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            like_repo: self.like_repo.ok_or_else(|| missing("like_repo"))?,
            match_repo: self.match_repo.ok_or_else(|| missing("match_repo"))?,
            notification_repo: self
                .notification_repo
                .ok_or_else(|| missing("notification_repo"))?,
            profile_repo: self.profile_repo.ok_or_else(|| missing("profile_repo"))?,
            plan_repo: self.plan_repo.ok_or_else(|| missing("plan_repo"))?,
            id_generator: self.id_generator.unwrap_or_default(),
            retry_policy: self.retry_policy.unwrap_or_default(),
        })
    }
}

fn missing(dependency: &str) -> ServiceError {
    ServiceError::validation(format!("{dependency} is required"))
}
