//! # vanish-service
//!
//! Application layer: the message lifecycle, reaction aggregation, reminder
//! preferences, and the background expiry sweeper.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::*;
