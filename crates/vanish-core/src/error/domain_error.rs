//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    #[error("Content must be between {min} and {max} characters (got {len})")]
    ContentLength { len: usize, min: usize, max: usize },

    #[error("Reminder lead time must be between {min} and {max} minutes (got {minutes})")]
    NotifyBeforeOutOfRange { minutes: i32, min: i32, max: i32 },

    #[error("Invalid reaction kind: {0}")]
    InvalidReactionKind(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::ContentLength { .. } => "INVALID_CONTENT_LENGTH",
            Self::NotifyBeforeOutOfRange { .. } => "INVALID_NOTIFY_BEFORE",
            Self::InvalidReactionKind(_) => "INVALID_REACTION_KIND",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MessageNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ContentLength { .. }
                | Self::NotifyBeforeOutOfRange { .. }
                | Self::InvalidReactionKind(_)
        )
    }
}
