//! Domain entities - core business objects

mod message;
mod preference;
mod reaction;

pub use message::{message_ttl, validate_content, Message};
pub use preference::{validate_notify_before, UserPreference};
pub use reaction::{Reaction, ReactionCounts, ReactionKind};
