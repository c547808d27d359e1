//! User preference database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for user_preferences table
#[derive(Debug, Clone, FromRow)]
pub struct PreferenceModel {
    pub user_id: i64,
    pub notifications_enabled: bool,
    pub notify_before_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
