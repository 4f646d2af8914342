//! # vivah-db
//!
//! Persistence layer implementing the repository traits of `vivah-core`.
//!
//! ## Overview
//!
//! - PostgreSQL via SQLx: pool management, embedded migrations, `FromRow`
//!   models, entity mappers and one repository per trait
//! - [`InMemoryStore`]: a single process-local store implementing every
//!   trait, with fault injection for tests
//!
//! Uniqueness is enforced by natural keys in both backends: `(liker, liked)`
//! for likes, the sorted user pair for matches and
//! `(recipient, kind, source_id)` for notifications.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vivah_db::{create_pool, run_migrations, PgLikeRepository, PoolOptions};
//!
//! async fn example(config: &vivah_common::DatabaseConfig) -> anyhow::Result<()> {
//!     let pool = create_pool(config, &PoolOptions::default()).await?;
//!     run_migrations(&pool).await?;
//!     let likes = PgLikeRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{FaultPlan, InMemoryStore};
pub use pool::{create_pool, run_migrations, PgPool, PoolOptions};
pub use repositories::{
    PgLikeRepository, PgMatchRepository, PgNotificationRepository, PgPlanRepository,
    PgProfileRepository,
};
