//! Business logic services
//!
//! Every service borrows the shared [`ServiceContext`] for the duration of a
//! request. The caller's identity is always an explicit argument.

pub mod context;
pub mod error;
pub mod message;
pub mod preference;
pub mod reaction;
pub mod sweeper;

pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use message::MessageService;
pub use preference::PreferenceService;
pub use reaction::ReactionService;
pub use sweeper::{ExpirySweeper, SweeperHandle, SweeperState};
