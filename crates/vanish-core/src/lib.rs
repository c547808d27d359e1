//! # vanish-core
//!
//! Domain layer for ephemeral notes: messages with a fixed lifetime, like/dislike
//! reactions, notification preferences, the clock abstraction, and the repository
//! traits the storage layer implements.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod clock;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use clock::{Clock, ManualClock, SystemClock};
pub use entities::{
    message_ttl, validate_content, validate_notify_before, Message, Reaction, ReactionCounts,
    ReactionKind, UserPreference,
};
pub use error::DomainError;
pub use traits::{MessageRepository, PreferenceRepository, ReactionRepository, RepoResult};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
