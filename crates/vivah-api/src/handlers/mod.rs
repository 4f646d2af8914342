//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod health;
pub mod likes;
pub mod matches;
pub mod notifications;
pub mod profiles;
