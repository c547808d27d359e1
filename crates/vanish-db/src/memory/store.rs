//! `dashmap`-backed implementation of every repository trait
//!
//! State lives for the lifetime of the process. Each map shard is locked
//! independently, so operations on different keys never contend.
//!
//! Lock order is always `messages` before `reactions`: a reaction upsert
//! holds the parent message's read guard while it writes, which makes a
//! concurrent delete wait and then cascade over the new row.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::instrument;

use vanish_core::traits::{MessageRepository, PreferenceRepository, ReactionRepository, RepoResult};
use vanish_core::{
    validate_notify_before, DomainError, Message, Reaction, ReactionCounts, ReactionKind,
    Snowflake, UserPreference,
};

#[derive(Debug, Default)]
struct Inner {
    messages: DashMap<Snowflake, Message>,
    reactions: DashMap<(Snowflake, Snowflake), Reaction>,
    preferences: DashMap<Snowflake, UserPreference>,
}

/// Process-local store; clones share the same state
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored messages, expired ones included
    pub fn message_count(&self) -> usize {
        self.inner.messages.len()
    }

    /// Number of stored reaction rows
    pub fn reaction_count(&self) -> usize {
        self.inner.reactions.len()
    }

    fn drop_reactions_of(&self, message_id: Snowflake) {
        self.inner
            .reactions
            .retain(|(reacted_to, _), _| *reacted_to != message_id);
    }

    fn newest_first(mut messages: Vec<Message>) -> Vec<Message> {
        messages.sort_unstable_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        messages
    }
}

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        Ok(self.inner.messages.get(&id).map(|m| m.value().clone()))
    }

    async fn find_active(&self, now: DateTime<Utc>) -> RepoResult<Vec<Message>> {
        let active = self
            .inner
            .messages
            .iter()
            .filter(|m| m.expires_at > now)
            .map(|m| m.value().clone())
            .collect();
        Ok(Self::newest_first(active))
    }

    async fn find_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Message>> {
        let authored = self
            .inner
            .messages
            .iter()
            .filter(|m| m.is_authored_by(author_id))
            .map(|m| m.value().clone())
            .collect();
        Ok(Self::newest_first(authored))
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        use dashmap::mapref::entry::Entry;

        match self.inner.messages.entry(message.id) {
            Entry::Occupied(_) => Err(DomainError::DatabaseError(format!(
                "duplicate message id {}",
                message.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(message.clone());
                Ok(())
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        let removed = self.inner.messages.remove(&id).is_some();
        if removed {
            self.drop_reactions_of(id);
        }
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn delete_expired(&self, now: DateTime<Utc>) -> RepoResult<u64> {
        let mut expired = Vec::new();
        self.inner.messages.retain(|id, message| {
            let keep = message.expires_at > now;
            if !keep {
                expired.push(*id);
            }
            keep
        });

        if !expired.is_empty() {
            self.inner
                .reactions
                .retain(|(message_id, _), _| !expired.contains(message_id));
        }
        Ok(expired.len() as u64)
    }
}

#[async_trait]
impl ReactionRepository for MemoryStore {
    #[instrument(skip(self, reaction), fields(message_id = %reaction.message_id, user_id = %reaction.user_id, kind = %reaction.kind))]
    async fn upsert(&self, reaction: &Reaction) -> RepoResult<()> {
        // Held until the write below completes
        let Some(_parent) = self.inner.messages.get(&reaction.message_id) else {
            return Err(DomainError::MessageNotFound(reaction.message_id));
        };

        self.inner
            .reactions
            .entry((reaction.message_id, reaction.user_id))
            .and_modify(|existing| existing.overwrite(reaction.kind, reaction.updated_at))
            .or_insert_with(|| reaction.clone());
        Ok(())
    }

    async fn counts(&self, message_id: Snowflake) -> RepoResult<ReactionCounts> {
        Ok(ReactionCounts::tally(
            self.inner
                .reactions
                .iter()
                .filter(|r| r.message_id == message_id)
                .map(|r| r.kind),
        ))
    }

    async fn find_kind(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<ReactionKind>> {
        Ok(self
            .inner
            .reactions
            .get(&(message_id, user_id))
            .map(|r| r.kind))
    }
}

#[async_trait]
impl PreferenceRepository for MemoryStore {
    async fn get_or_create(
        &self,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> RepoResult<UserPreference> {
        Ok(self
            .inner
            .preferences
            .entry(user_id)
            .or_insert_with(|| UserPreference::with_defaults(user_id, now))
            .clone())
    }

    #[instrument(skip(self))]
    async fn update(
        &self,
        user_id: Snowflake,
        notifications_enabled: bool,
        notify_before_minutes: i32,
        now: DateTime<Utc>,
    ) -> RepoResult<UserPreference> {
        validate_notify_before(notify_before_minutes)?;

        let mut preference = self
            .inner
            .preferences
            .entry(user_id)
            .or_insert_with(|| UserPreference::with_defaults(user_id, now));
        preference.apply(notifications_enabled, notify_before_minutes, now)?;
        Ok(preference.clone())
    }
}
