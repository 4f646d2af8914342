//! Shared setup for service tests: an in-memory store with seeded profiles

#![allow(dead_code)]

use std::sync::Arc;

use vivah_core::{ContactDetails, PlanTier, Profile, ProfileBasics, UserId};
use vivah_db::InMemoryStore;
use vivah_service::{RetryPolicy, ServiceContext};

pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub ctx: ServiceContext,
}

impl Harness {
    /// Store with profiles for `users`, all on the free plan
    pub fn with_users(users: &[&str]) -> Self {
        let store = Arc::new(InMemoryStore::new());
        for user in users {
            store.insert_profile(profile(user));
        }
        let ctx = ServiceContext::builder()
            .store(store.clone())
            .retry_policy(RetryPolicy::immediate(3))
            .build()
            .expect("context");
        Self { store, ctx }
    }

    pub fn premium(&self, user: &str) {
        self.store.set_plan(UserId::new(user), PlanTier::Premium);
    }
}

pub fn uid(id: &str) -> UserId {
    UserId::new(id)
}

pub fn profile(id: &str) -> Profile {
    let mut name = id.to_string();
    if let Some(first) = name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    Profile {
        user_id: UserId::new(id),
        basics: ProfileBasics {
            name,
            age: Some(28),
            photos: vec![format!("https://img.vivah.test/{id}.jpg")],
            bio: None,
            location: Some("Pune".to_string()),
            profession: Some("Engineer".to_string()),
        },
        contact: ContactDetails {
            phone: Some("9876543210".to_string()),
            email: Some(format!("{id}@mail.in")),
        },
    }
}
