//! Like database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for likes table
#[derive(Debug, Clone, FromRow)]
pub struct LikeModel {
    pub id: i64,
    pub liker_id: String,
    pub liked_id: String,
    pub created_at: DateTime<Utc>,
}
