//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs and the storage layer provides
//! the implementation (Postgres or in-memory). Every time-dependent query
//! takes `now` explicitly so callers decide which clock drives expiry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Message, Reaction, ReactionCounts, ReactionKind, UserPreference};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find message by ID, expired or not
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>>;

    /// Messages with `expires_at > now`, newest first
    async fn find_active(&self, now: DateTime<Utc>) -> RepoResult<Vec<Message>>;

    /// All messages authored by a user, newest first, including expired
    /// ones the sweeper has not reached yet
    async fn find_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Message>>;

    /// Persist a new message
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Hard delete a message and its reactions. Returns whether a row existed.
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;

    /// Delete every message with `expires_at <= now`. Returns how many went.
    async fn delete_expired(&self, now: DateTime<Utc>) -> RepoResult<u64>;

    /// Cheap connectivity probe for readiness checks
    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Insert or overwrite the `(message_id, user_id)` reaction
    ///
    /// Fails with `DomainError::MessageNotFound` if the message is gone.
    async fn upsert(&self, reaction: &Reaction) -> RepoResult<()>;

    /// Like/dislike counts for a message
    async fn counts(&self, message_id: Snowflake) -> RepoResult<ReactionCounts>;

    /// The kind `user_id` currently holds on a message, if any
    async fn find_kind(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<ReactionKind>>;
}

// ============================================================================
// Preference Repository
// ============================================================================

#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Return the user's preferences, creating the default record on first access
    async fn get_or_create(&self, user_id: Snowflake, now: DateTime<Utc>)
        -> RepoResult<UserPreference>;

    /// Store new settings, creating the record if missing
    ///
    /// Fails with `DomainError::NotifyBeforeOutOfRange` before touching storage.
    async fn update(
        &self,
        user_id: Snowflake,
        notifications_enabled: bool,
        notify_before_minutes: i32,
        now: DateTime<Utc>,
    ) -> RepoResult<UserPreference>;
}
