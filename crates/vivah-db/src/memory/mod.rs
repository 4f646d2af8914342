//! In-memory store
//!
//! Implements every repository trait against process memory. Used by tests
//! and by the API when no database is configured. Faults can be injected to
//! exercise retry and isolation paths.

mod faults;
mod store;

pub use faults::FaultPlan;
pub use store::InMemoryStore;
