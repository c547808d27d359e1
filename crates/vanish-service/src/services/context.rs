//! Service context - dependency container for services
//!
//! Holds the storage handles, the clock, and the id generator shared by
//! every request task and the sweeper.

use std::sync::Arc;

use vanish_core::traits::{MessageRepository, PreferenceRepository, ReactionRepository};
use vanish_core::{Clock, Snowflake, SnowflakeGenerator};
use vanish_db::{
    MemoryStore, PgMessageRepository, PgPool, PgPreferenceRepository, PgReactionRepository,
};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Present only when backed by PostgreSQL
    pool: Option<PgPool>,

    // Repositories
    message_repo: Arc<dyn MessageRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    preference_repo: Arc<dyn PreferenceRepository>,

    clock: Arc<dyn Clock>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Context backed by PostgreSQL repositories sharing one pool
    pub fn postgres(
        pool: PgPool,
        clock: Arc<dyn Clock>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            message_repo: Arc::new(PgMessageRepository::new(pool.clone())),
            reaction_repo: Arc::new(PgReactionRepository::new(pool.clone())),
            preference_repo: Arc::new(PgPreferenceRepository::new(pool.clone())),
            pool: Some(pool),
            clock,
            snowflake_generator,
        }
    }

    /// Context backed by one process-local [`MemoryStore`]
    pub fn in_memory(
        store: MemoryStore,
        clock: Arc<dyn Clock>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            pool: None,
            message_repo: Arc::new(store.clone()),
            reaction_repo: Arc::new(store.clone()),
            preference_repo: Arc::new(store),
            clock,
            snowflake_generator,
        }
    }

    /// Name of the active storage backend
    pub fn backend(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }

    // === Repositories ===

    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Shared handle, for owners that outlive a request (the sweeper)
    pub fn message_repo_handle(&self) -> Arc<dyn MessageRepository> {
        Arc::clone(&self.message_repo)
    }

    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    pub fn preference_repo(&self) -> &dyn PreferenceRepository {
        self.preference_repo.as_ref()
    }

    // === Time and ids ===

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Read the clock once
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("backend", &self.backend())
            .field("clock", &self.clock)
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish_non_exhaustive()
    }
}
