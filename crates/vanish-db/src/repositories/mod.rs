//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in vanish-core.

mod error;
mod message;
mod preference;
mod reaction;

pub use message::PgMessageRepository;
pub use preference::PgPreferenceRepository;
pub use reaction::PgReactionRepository;
