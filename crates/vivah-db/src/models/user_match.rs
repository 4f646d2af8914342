//! Match database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for matches table
#[derive(Debug, Clone, FromRow)]
pub struct MatchModel {
    pub id: i64,
    pub user_low: String,
    pub user_high: String,
    pub created_at: DateTime<Utc>,
}
