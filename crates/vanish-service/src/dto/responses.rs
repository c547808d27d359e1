//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use vanish_core::ReactionKind;

// ============================================================================
// Common Response Types
// ============================================================================

/// Outcome of a command with no other payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn new(success: bool) -> Self {
        Self { success }
    }

    pub fn ok() -> Self {
        Self::new(true)
    }
}

// ============================================================================
// Message Responses
// ============================================================================

/// A message as seen at one instant
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Whole seconds until expiry, zero once expired
    pub remaining_seconds: i64,
    /// Share of the lifetime left, in [0, 1]
    pub remaining_fraction: f64,
}

/// Message with reaction totals and the viewer's own reaction
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedMessageResponse {
    #[serde(flatten)]
    pub message: MessageResponse,
    pub likes: i64,
    pub dislikes: i64,
    pub user_reaction: Option<ReactionKind>,
}

/// Result of reacting to a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReactionSummaryResponse {
    pub likes: i64,
    pub dislikes: i64,
    pub user_reaction: Option<ReactionKind>,
}

// ============================================================================
// Dashboard Responses
// ============================================================================

/// Notification preferences
#[derive(Debug, Clone, Serialize)]
pub struct PreferencesResponse {
    pub user_id: String,
    pub notifications_enabled: bool,
    pub notify_before_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A message inside its reminder window
#[derive(Debug, Clone, Serialize)]
pub struct ReminderResponse {
    #[serde(flatten)]
    pub message: MessageResponse,
    /// Short excerpt for notification text
    pub preview: String,
    pub remind_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    /// `postgres` or `memory`
    pub backend: String,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, backend: &str) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            backend: backend.to_string(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
