//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;
use vanish_core::ReactionKind;

// ============================================================================
// Message Requests
// ============================================================================

/// Post message request
///
/// `validator` counts characters, matching the domain rule, so oversized
/// content is rejected before any storage call.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMessageRequest {
    #[validate(length(min = 1, max = 500, message = "Content must be 1-500 characters"))]
    pub content: String,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Like or dislike a message
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct ReactRequest {
    pub kind: ReactionKind,
}

// ============================================================================
// Dashboard Requests
// ============================================================================

/// Replace the caller's notification preferences
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct UpdatePreferencesRequest {
    pub notifications_enabled: bool,

    #[validate(range(min = 5, max = 1440, message = "notify_before_minutes must be 5-1440"))]
    pub notify_before_minutes: i32,
}
