//! Reaction entity - a user's like or dislike on a message

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// The two possible reactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    /// Storage/wire representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            other => Err(DomainError::InvalidReactionKind(other.to_string())),
        }
    }
}

/// Reaction entity
///
/// Identity is the `(message_id, user_id)` pair: a user holds at most one
/// reaction per message, and reacting again overwrites `kind` in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub message_id: Snowflake,
    pub user_id: Snowflake,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(
        message_id: Snowflake,
        user_id: Snowflake,
        kind: ReactionKind,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            message_id,
            user_id,
            kind,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the kind, keeping the original creation time
    pub fn overwrite(&mut self, kind: ReactionKind, now: DateTime<Utc>) {
        self.kind = kind;
        self.updated_at = now;
    }
}

/// Aggregated reaction counts for one message
///
/// Derived from the reaction rows at query time, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReactionCounts {
    pub likes: i64,
    pub dislikes: i64,
}

impl ReactionCounts {
    pub fn new(likes: i64, dislikes: i64) -> Self {
        Self { likes, dislikes }
    }

    /// Tally a sequence of reaction kinds
    pub fn tally<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = ReactionKind>,
    {
        kinds.into_iter().fold(Self::default(), |mut acc, kind| {
            match kind {
                ReactionKind::Like => acc.likes += 1,
                ReactionKind::Dislike => acc.dislikes += 1,
            }
            acc
        })
    }
}
