//! Record identifiers for likes, matches, and notifications
//!
//! 64-bit, time-ordered ids:
//! - Bits 63-22: milliseconds since [`RecordId::EPOCH`]
//! - Bits 21-12: worker id (0-1023)
//! - Bits 11-0:  per-millisecond sequence

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

const SEQUENCE_BITS: u32 = 12;
const WORKER_BITS: u32 = 10;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;
const MAX_WORKER_ID: u16 = (1 << WORKER_BITS) - 1;

/// Time-ordered 64-bit record id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RecordId(i64);

impl RecordId {
    /// 2025-01-01 00:00:00 UTC in milliseconds
    pub const EPOCH: i64 = 1_735_689_600_000;

    #[inline]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    fn compose(millis_since_epoch: i64, worker_id: u16, sequence: i64) -> Self {
        Self(
            (millis_since_epoch << (WORKER_BITS + SEQUENCE_BITS))
                | (i64::from(worker_id) << SEQUENCE_BITS)
                | sequence,
        )
    }

    /// Worker that minted this id
    pub fn worker_id(self) -> u16 {
        ((self.0 >> SEQUENCE_BITS) & i64::from(MAX_WORKER_ID)) as u16
    }
}

/// Error when parsing a [`RecordId`] from text
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid record id")]
pub struct RecordIdParseError;

impl FromStr for RecordId {
    type Err = RecordIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| RecordIdParseError)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<RecordId> for i64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

// JSON clients get strings; 64-bit integers lose precision in JavaScript.
impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(raw) => Ok(Self(raw)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Lock-free generator of [`RecordId`]s for one worker
///
/// The last issued `(millis, sequence)` is packed into a single atomic so a
/// compare-and-swap publishes both at once. When the sequence for the current
/// millisecond is exhausted, or the wall clock steps backwards, the generator
/// keeps counting forward from the last issued millisecond instead of waiting.
pub struct IdGenerator {
    worker_id: u16,
    last: AtomicI64,
}

impl IdGenerator {
    /// # Panics
    /// Panics if `worker_id` does not fit in 10 bits
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id <= MAX_WORKER_ID, "worker id must be < 1024");
        Self {
            worker_id,
            last: AtomicI64::new(0),
        }
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }

    /// Mint the next id; strictly increasing per generator
    pub fn generate(&self) -> RecordId {
        let mut current = self.last.load(Ordering::Acquire);
        loop {
            let last_millis = current >> SEQUENCE_BITS;
            let last_sequence = current & SEQUENCE_MASK;
            let now = millis_since_epoch();

            let next = if now > last_millis {
                now << SEQUENCE_BITS
            } else if last_sequence < SEQUENCE_MASK {
                current + 1
            } else {
                (last_millis + 1) << SEQUENCE_BITS
            };

            match self
                .last
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => {
                    return RecordId::compose(
                        next >> SEQUENCE_BITS,
                        self.worker_id,
                        next & SEQUENCE_MASK,
                    )
                }
                Err(actual) => current = actual,
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator")
            .field("worker_id", &self.worker_id)
            .finish()
    }
}

fn millis_since_epoch() -> i64 {
    (Utc::now().timestamp_millis() - RecordId::EPOCH).max(0)
}
