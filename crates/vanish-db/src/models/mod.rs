//! Database models - SQLx-compatible structs for PostgreSQL tables

mod message;
mod preference;
mod reaction;

pub use message::MessageModel;
pub use preference::PreferenceModel;
pub use reaction::{ReactionCountsModel, ReactionModel};
