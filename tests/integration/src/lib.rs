//! Integration test utilities for the Vivah API
//!
//! Spawns the full Axum application over an in-memory store and drives it
//! with a real HTTP client.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
