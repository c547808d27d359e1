//! Reaction database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub message_id: i64,
    pub user_id: i64,
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregated like/dislike counts (from query)
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ReactionCountsModel {
    pub likes: i64,
    pub dislikes: i64,
}
