//! # vanish-db
//!
//! Storage layer implementing the `vanish-core` repository traits.
//!
//! Two backends:
//!
//! - PostgreSQL via SQLx (`Pg*Repository`), with a runtime migration runner
//! - [`MemoryStore`], a `dashmap`-backed store used when no database is
//!   configured and by the service tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vanish_db::{create_pool, run_migrations, DatabaseConfig, PgMessageRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from_url("postgres://localhost/vanish")).await?;
//!     run_migrations(&pool, vanish_db::default_migrations_dir()).await?;
//!     let messages = PgMessageRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{
    create_pool, default_migrations_dir, run_migrations, DatabaseConfig, MigrationError, PgPool,
};
pub use repositories::{PgMessageRepository, PgPreferenceRepository, PgReactionRepository};
