//! Test fixtures and wire types
//!
//! Request bodies the tests send and the response shapes they read back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

/// Counter for unique user ids
static USER_COUNTER: AtomicI64 = AtomicI64::new(10_000);

/// A user id no other test uses
pub fn unique_user_id() -> i64 {
    USER_COUNTER.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreateMessageRequest {
    pub content: String,
}

impl CreateMessageRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Content of exactly `chars` characters
    pub fn of_length(chars: usize) -> Self {
        Self::new("a".repeat(chars))
    }
}

#[derive(Debug, Serialize)]
pub struct ReactRequest {
    pub kind: String,
}

impl ReactRequest {
    pub fn like() -> Self {
        Self {
            kind: "like".to_string(),
        }
    }

    pub fn dislike() -> Self {
        Self {
            kind: "dislike".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdatePreferencesRequest {
    pub notifications_enabled: bool,
    pub notify_before_minutes: i32,
}

impl UpdatePreferencesRequest {
    pub fn new(notifications_enabled: bool, notify_before_minutes: i32) -> Self {
        Self {
            notifications_enabled,
            notify_before_minutes,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub id: String,
    pub content: String,
    pub author_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub remaining_seconds: i64,
    pub remaining_fraction: f64,
}

#[derive(Debug, Deserialize)]
pub struct EnrichedMessageBody {
    #[serde(flatten)]
    pub message: MessageBody,
    pub likes: i64,
    pub dislikes: i64,
    pub user_reaction: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct ReactionSummaryBody {
    pub likes: i64,
    pub dislikes: i64,
    pub user_reaction: Option<String>,
}

impl ReactionSummaryBody {
    pub fn expect(likes: i64, dislikes: i64, user_reaction: &str) -> Self {
        Self {
            likes,
            dislikes,
            user_reaction: Some(user_reaction.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PreferencesBody {
    pub user_id: String,
    pub notifications_enabled: bool,
    pub notify_before_minutes: i32,
}

#[derive(Debug, Deserialize)]
pub struct ReminderBody {
    #[serde(flatten)]
    pub message: MessageBody,
    pub preview: String,
    pub remind_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SuccessBody {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ReadinessBody {
    pub status: String,
    pub backend: String,
}
