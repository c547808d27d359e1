//! Entity to DTO mappers
//!
//! Responses that show time left are rendered against an explicit `now`
//! so one request reads the clock once.

use chrono::{DateTime, Utc};
use vanish_core::{Message, ReactionCounts, ReactionKind, UserPreference};

use super::responses::{
    EnrichedMessageResponse, MessageResponse, PreferencesResponse, ReactionSummaryResponse,
    ReminderResponse,
};

// ============================================================================
// Message Mappers
// ============================================================================

impl MessageResponse {
    pub fn at(message: &Message, now: DateTime<Utc>) -> Self {
        Self {
            id: message.id.to_string(),
            content: message.content.clone(),
            author_id: message.author_id.map(|id| id.to_string()),
            created_at: message.created_at,
            expires_at: message.expires_at,
            remaining_seconds: message.remaining(now).num_seconds(),
            remaining_fraction: message.remaining_fraction(now),
        }
    }
}

/// Message with its engagement data, before rendering
#[derive(Debug, Clone)]
pub struct EnrichedMessage {
    pub message: Message,
    pub counts: ReactionCounts,
    pub user_reaction: Option<ReactionKind>,
}

impl EnrichedMessage {
    pub fn into_response(self, now: DateTime<Utc>) -> EnrichedMessageResponse {
        EnrichedMessageResponse {
            message: MessageResponse::at(&self.message, now),
            likes: self.counts.likes,
            dislikes: self.counts.dislikes,
            user_reaction: self.user_reaction,
        }
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

impl ReactionSummaryResponse {
    pub fn new(counts: ReactionCounts, user_reaction: Option<ReactionKind>) -> Self {
        Self {
            likes: counts.likes,
            dislikes: counts.dislikes,
            user_reaction,
        }
    }
}

// ============================================================================
// Dashboard Mappers
// ============================================================================

impl From<&UserPreference> for PreferencesResponse {
    fn from(pref: &UserPreference) -> Self {
        Self {
            user_id: pref.user_id.to_string(),
            notifications_enabled: pref.notifications_enabled,
            notify_before_minutes: pref.notify_before_minutes,
            created_at: pref.created_at,
            updated_at: pref.updated_at,
        }
    }
}

impl From<UserPreference> for PreferencesResponse {
    fn from(pref: UserPreference) -> Self {
        Self::from(&pref)
    }
}

/// Characters of content carried in a reminder
pub const REMINDER_PREVIEW_CHARS: usize = 40;

impl ReminderResponse {
    pub fn at(message: &Message, pref: &UserPreference, now: DateTime<Utc>) -> Self {
        Self {
            message: MessageResponse::at(message, now),
            preview: message.preview(REMINDER_PREVIEW_CHARS).to_string(),
            remind_at: pref.reminder_at(message),
        }
    }
}
