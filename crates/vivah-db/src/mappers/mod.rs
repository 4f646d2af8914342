//! Entity <-> Model mappers
//!
//! Conversions between domain entities and database models.

mod like;
mod notification;
mod profile;
mod user_match;
