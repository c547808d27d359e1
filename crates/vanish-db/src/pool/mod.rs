//! Database connection pool management

mod postgres;

pub use postgres::{
    create_pool, default_migrations_dir, run_migrations, DatabaseConfig, MigrationError,
};

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
