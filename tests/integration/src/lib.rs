//! Integration test utilities for the vanish API
//!
//! This crate spawns the full HTTP stack over the in-memory store and a
//! manual clock, so tests can step through a message's 24 hour lifetime.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
