//! Repository traits (ports)

mod repositories;

pub use repositories::{MessageRepository, PreferenceRepository, ReactionRepository, RepoResult};
