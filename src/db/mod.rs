//! Database layer
//!
//! Connection pooling, migrations, and the repositories the services
//! are built on. Two backends are supported:
//! - SQLite (default, for single-binary deployment)
//! - PostgreSQL (for larger deployments)
//!
//! The driver is chosen from configuration at startup. Everything above
//! this layer works against the `DatabasePool` trait and the repository
//! traits, so the services never see which backend is in use.
//!
//! ```ignore
//! use booking_backend::config::DatabaseConfig;
//! use booking_backend::db::{create_pool, migrations};
//!
//! let pool = create_pool(&DatabaseConfig::default()).await?;
//! migrations::run_migrations(&pool).await?;
//! pool.ping().await?;
//! ```

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{
    create_pool, create_test_pool, DatabasePool, DynDatabasePool, PostgresDatabase, SqliteDatabase,
};
