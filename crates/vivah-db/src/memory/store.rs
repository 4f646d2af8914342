//! DashMap-backed implementation of all repository traits

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::instrument;

use vivah_core::traits::{
    Insertion, LikeRepository, MatchRepository, NotificationRepository, PlanRepository,
    ProfileRepository, RepoResult,
};
use vivah_core::{
    DisplayInfo, DomainError, Like, Match, Notification, NotificationKind, PlanTier, Profile,
    RecordId, UserId, UserPair,
};

use super::faults::FaultPlan;

type NotificationKey = (UserId, NotificationKind, RecordId);

/// In-process store honoring the same uniqueness keys as the database
#[derive(Debug, Default)]
pub struct InMemoryStore {
    likes: DashMap<(UserId, UserId), Like>,
    matches: DashMap<UserPair, Match>,
    notifications: DashMap<NotificationKey, Notification>,
    profiles: DashMap<UserId, Profile>,
    plans: DashMap<UserId, PlanTier>,
    faults: FaultPlan,
    notification_writes: AtomicU64,
    match_writes: AtomicU64,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fault injection switches
    pub fn faults(&self) -> &FaultPlan {
        &self.faults
    }

    /// Seed a profile (normally owned by the profile service)
    pub fn insert_profile(&self, profile: Profile) {
        self.profiles.insert(profile.user_id.clone(), profile);
    }

    /// Record a plan (normally written by the payment approval workflow)
    pub fn set_plan(&self, user_id: UserId, plan: PlanTier) {
        self.plans.insert(user_id, plan);
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Every stored notification for `recipient`, any read state
    pub fn notifications_for(&self, recipient: &UserId) -> Vec<Notification> {
        let owned: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|entry| entry.value().belongs_to(recipient))
            .map(|entry| entry.value().clone())
            .collect();
        newest_first(owned, |n| (n.created_at, n.id))
    }

    /// Notification insert attempts that reached the store, including failed ones
    pub fn notification_write_attempts(&self) -> u64 {
        self.notification_writes.load(Ordering::SeqCst)
    }

    /// Match insert attempts that reached the store, including failed ones
    pub fn match_write_attempts(&self) -> u64 {
        self.match_writes.load(Ordering::SeqCst)
    }

    async fn before_write(&self) {
        if let Some(delay) = self.faults.write_delay() {
            tokio::time::sleep(delay).await;
        } else {
            tokio::task::yield_now().await;
        }
    }
}

fn newest_first<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by_key(|item| Reverse(key(item)));
    items
}

fn take_limit<T>(items: Vec<T>, limit: i64) -> Vec<T> {
    let limit = usize::try_from(limit.clamp(1, 100)).unwrap_or(100);
    items.into_iter().take(limit).collect()
}

#[async_trait]
impl LikeRepository for InMemoryStore {
    async fn find(&self, liker_id: &UserId, liked_id: &UserId) -> RepoResult<Option<Like>> {
        self.faults.check_available()?;
        Ok(self
            .likes
            .get(&(liker_id.clone(), liked_id.clone()))
            .map(|like| like.clone()))
    }

    #[instrument(skip(self, like), fields(liker = %like.liker_id, liked = %like.liked_id))]
    async fn insert_if_absent(&self, like: &Like) -> RepoResult<Insertion<Like>> {
        self.before_write().await;
        self.faults.check_available()?;
        if like.liker_id == like.liked_id {
            return Err(DomainError::InvalidSelfAction(like.liker_id.clone()));
        }

        match self.likes.entry((like.liker_id.clone(), like.liked_id.clone())) {
            Entry::Occupied(existing) => Ok(Insertion::Existing(existing.get().clone())),
            Entry::Vacant(slot) => {
                slot.insert(like.clone());
                Ok(Insertion::Created(like.clone()))
            }
        }
    }

    async fn find_received(&self, liked_id: &UserId, limit: i64) -> RepoResult<Vec<Like>> {
        self.faults.check_available()?;
        let received: Vec<Like> = self
            .likes
            .iter()
            .filter(|entry| &entry.value().liked_id == liked_id)
            .map(|entry| entry.value().clone())
            .collect();
        Ok(take_limit(newest_first(received, |l| (l.created_at, l.id)), limit))
    }

    async fn find_sent(&self, liker_id: &UserId, limit: i64) -> RepoResult<Vec<Like>> {
        self.faults.check_available()?;
        let sent: Vec<Like> = self
            .likes
            .iter()
            .filter(|entry| &entry.value().liker_id == liker_id)
            .map(|entry| entry.value().clone())
            .collect();
        Ok(take_limit(newest_first(sent, |l| (l.created_at, l.id)), limit))
    }
}

#[async_trait]
impl MatchRepository for InMemoryStore {
    async fn find_by_pair(&self, pair: &UserPair) -> RepoResult<Option<Match>> {
        self.faults.check_available()?;
        Ok(self.matches.get(pair).map(|m| m.clone()))
    }

    #[instrument(skip(self, matched), fields(match_id = %matched.id))]
    async fn insert_if_absent(&self, matched: &Match) -> RepoResult<Insertion<Match>> {
        self.before_write().await;
        self.match_writes.fetch_add(1, Ordering::SeqCst);
        self.faults.check_match_write()?;
        let pair = matched.pair()?;

        match self.matches.entry(pair) {
            Entry::Occupied(existing) => Ok(Insertion::Existing(existing.get().clone())),
            Entry::Vacant(slot) => {
                slot.insert(matched.clone());
                Ok(Insertion::Created(matched.clone()))
            }
        }
    }

    async fn find_by_user(&self, user_id: &UserId, limit: i64) -> RepoResult<Vec<Match>> {
        self.faults.check_available()?;
        let found: Vec<Match> = self
            .matches
            .iter()
            .filter(|entry| entry.value().involves(user_id))
            .map(|entry| entry.value().clone())
            .collect();
        Ok(take_limit(newest_first(found, |m| (m.created_at, m.id)), limit))
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    #[instrument(skip(self, notification), fields(
        recipient = %notification.recipient_id,
        kind = %notification.kind,
    ))]
    async fn insert_if_absent(
        &self,
        notification: &Notification,
    ) -> RepoResult<Insertion<Notification>> {
        self.before_write().await;
        self.notification_writes.fetch_add(1, Ordering::SeqCst);
        self.faults.check_notification_write(&notification.recipient_id)?;

        match self.notifications.entry(notification.event_key()) {
            Entry::Occupied(existing) => Ok(Insertion::Existing(existing.get().clone())),
            Entry::Vacant(slot) => {
                slot.insert(notification.clone());
                Ok(Insertion::Created(notification.clone()))
            }
        }
    }

    async fn find(&self, recipient_id: &UserId, id: RecordId) -> RepoResult<Option<Notification>> {
        self.faults.check_available()?;
        Ok(self
            .notifications
            .iter()
            .find(|entry| entry.value().id == id && entry.value().belongs_to(recipient_id))
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_recipient(
        &self,
        recipient_id: &UserId,
        unread_only: bool,
        limit: i64,
    ) -> RepoResult<Vec<Notification>> {
        self.faults.check_available()?;
        let inbox: Vec<Notification> = self
            .notifications_for(recipient_id)
            .into_iter()
            .filter(|n| !unread_only || !n.read)
            .collect();
        Ok(take_limit(inbox, limit))
    }

    async fn mark_read(&self, recipient_id: &UserId, id: RecordId) -> RepoResult<bool> {
        self.faults.check_available()?;
        let mut found = false;
        for mut entry in self.notifications.iter_mut() {
            if entry.value().id == id && entry.value().belongs_to(recipient_id) {
                entry.value_mut().read = true;
                found = true;
            }
        }
        Ok(found)
    }

    async fn mark_all_read(&self, recipient_id: &UserId) -> RepoResult<u64> {
        self.faults.check_available()?;
        let mut changed = 0;
        for mut entry in self.notifications.iter_mut() {
            if entry.value().belongs_to(recipient_id) && !entry.value().read {
                entry.value_mut().read = true;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn unread_count(&self, recipient_id: &UserId) -> RepoResult<i64> {
        self.faults.check_available()?;
        let count = self
            .notifications
            .iter()
            .filter(|entry| entry.value().belongs_to(recipient_id) && !entry.value().read)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find_profile(&self, user_id: &UserId) -> RepoResult<Option<Profile>> {
        self.faults.check_available()?;
        Ok(self.profiles.get(user_id).map(|p| p.clone()))
    }

    async fn find_display_info(&self, user_id: &UserId) -> RepoResult<Option<DisplayInfo>> {
        self.faults.check_display_lookup()?;
        Ok(self.profiles.get(user_id).map(|p| p.display_info()))
    }
}

#[async_trait]
impl PlanRepository for InMemoryStore {
    async fn find_plan(&self, user_id: &UserId) -> RepoResult<Option<PlanTier>> {
        self.faults.check_plan_lookup()?;
        Ok(self.plans.get(user_id).map(|p| *p))
    }
}
