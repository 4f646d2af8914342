//! Fault injection switches for the in-memory store

use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;
use vivah_core::{DomainError, RepoResult, UserId};

/// Faults the store will raise on upcoming calls
#[derive(Debug, Default)]
pub struct FaultPlan {
    unavailable: AtomicBool,
    plan_lookups_fail: AtomicBool,
    display_lookups_fail: AtomicBool,
    notification_write_failures: AtomicU32,
    match_write_failures: AtomicU32,
    unreachable_recipients: Mutex<HashSet<UserId>>,
    write_delay: Mutex<Option<Duration>>,
}

impl FaultPlan {
    /// Every call fails with `StoreUnavailable` while set
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn fail_plan_lookups(&self, fail: bool) {
        self.plan_lookups_fail.store(fail, Ordering::SeqCst);
    }

    pub fn fail_display_lookups(&self, fail: bool) {
        self.display_lookups_fail.store(fail, Ordering::SeqCst);
    }

    /// The next `count` notification writes fail
    pub fn fail_notification_writes(&self, count: u32) {
        self.notification_write_failures.store(count, Ordering::SeqCst);
    }

    /// The next `count` match writes fail
    pub fn fail_match_writes(&self, count: u32) {
        self.match_write_failures.store(count, Ordering::SeqCst);
    }

    /// Notification writes addressed to `recipient` fail until cleared
    pub fn make_unreachable(&self, recipient: UserId) {
        self.unreachable_recipients.lock().insert(recipient);
    }

    pub fn make_reachable(&self, recipient: &UserId) {
        self.unreachable_recipients.lock().remove(recipient);
    }

    /// Sleep before each write, widening race windows in concurrency tests
    pub fn set_write_delay(&self, delay: Option<Duration>) {
        *self.write_delay.lock() = delay;
    }

    pub(crate) fn write_delay(&self) -> Option<Duration> {
        *self.write_delay.lock()
    }

    pub(crate) fn check_available(&self) -> RepoResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable("store offline"));
        }
        Ok(())
    }

    pub(crate) fn check_plan_lookup(&self) -> RepoResult<()> {
        self.check_available()?;
        if self.plan_lookups_fail.load(Ordering::SeqCst) {
            return Err(unavailable("plan lookup failed"));
        }
        Ok(())
    }

    pub(crate) fn check_display_lookup(&self) -> RepoResult<()> {
        self.check_available()?;
        if self.display_lookups_fail.load(Ordering::SeqCst) {
            return Err(unavailable("profile lookup failed"));
        }
        Ok(())
    }

    pub(crate) fn check_notification_write(&self, recipient: &UserId) -> RepoResult<()> {
        self.check_available()?;
        if self.unreachable_recipients.lock().contains(recipient) {
            return Err(unavailable("recipient inbox unreachable"));
        }
        if take_one(&self.notification_write_failures) {
            return Err(unavailable("notification write failed"));
        }
        Ok(())
    }

    pub(crate) fn check_match_write(&self) -> RepoResult<()> {
        self.check_available()?;
        if take_one(&self.match_write_failures) {
            return Err(unavailable("match write failed"));
        }
        Ok(())
    }
}

fn unavailable(reason: &str) -> DomainError {
    DomainError::StoreUnavailable(reason.to_string())
}

/// Decrement a countdown; true if a failure was consumed
fn take_one(counter: &AtomicU32) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}
