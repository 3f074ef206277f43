//! Database migrations module
//!
//! This module provides code-based database migrations for the booking
//! backend. All migrations are embedded directly in Rust code as SQL strings,
//! supporting both SQLite and PostgreSQL databases for single-binary
//! deployment.
//!
//! # Usage
//!
//! ```ignore
//! use booking_backend::db::{create_pool, migrations};
//!
//! let pool = create_pool(&config).await?;
//! migrations::run_migrations(&pool).await?;
//! ```
//!
//! # Architecture
//!
//! Each migration is defined as a `Migration` struct containing:
//! - `version`: Unique version number for ordering
//! - `name`: Human-readable migration name
//! - `up_sqlite`: SQL for SQLite database
//! - `up_postgres`: SQL for PostgreSQL database

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, SqlitePool};

use super::DynDatabasePool;
use crate::config::DatabaseDriver;

/// A database migration with SQL for both SQLite and PostgreSQL
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version number (must be unique and sequential)
    pub version: i32,
    /// Human-readable migration name
    pub name: &'static str,
    /// SQL statements for SQLite
    pub up_sqlite: &'static str,
    /// SQL statements for PostgreSQL
    pub up_postgres: &'static str,
}

/// Migration record stored in the database
#[derive(Debug, Clone)]
pub struct MigrationRecord {
    /// Migration version number
    pub version: i64,
    /// Migration name/description
    pub name: String,
    /// When the migration was applied
    pub applied_at: DateTime<Utc>,
}

/// All migrations for the booking backend.
/// These are embedded in the binary for single-binary deployment.
pub const MIGRATIONS: &[Migration] = &[
    // Migration 1: Create restaurants table
    Migration {
        version: 1,
        name: "create_restaurants",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS restaurants (
                id VARCHAR(36) PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                location VARCHAR(255) NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                phone VARCHAR(20) NOT NULL DEFAULT '',
                email VARCHAR(255) NOT NULL DEFAULT '',
                is_active BOOLEAN NOT NULL DEFAULT 1
            );
        "#,
        up_postgres: r#"
            CREATE TABLE IF NOT EXISTS restaurants (
                id VARCHAR(36) PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                location VARCHAR(255) NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                phone VARCHAR(20) NOT NULL DEFAULT '',
                email VARCHAR(255) NOT NULL DEFAULT '',
                is_active BOOLEAN NOT NULL DEFAULT TRUE
            );
        "#,
    },
    // Migration 2: Create time_slots table
    Migration {
        version: 2,
        name: "create_time_slots",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS time_slots (
                id VARCHAR(36) PRIMARY KEY,
                slot_name VARCHAR(100) NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
        "#,
        up_postgres: r#"
            CREATE TABLE IF NOT EXISTS time_slots (
                id VARCHAR(36) PRIMARY KEY,
                slot_name VARCHAR(100) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
        "#,
    },
    // Migration 3: Create users table
    Migration {
        version: 3,
        name: "create_users",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS users (
                id VARCHAR(36) PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                email VARCHAR(255) NOT NULL UNIQUE,
                password_hash VARCHAR(255) NOT NULL,
                phone VARCHAR(20) NOT NULL DEFAULT '',
                role VARCHAR(20) NOT NULL DEFAULT 'user',
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);
            CREATE INDEX IF NOT EXISTS idx_users_name ON users(name);
        "#,
        up_postgres: r#"
            CREATE TABLE IF NOT EXISTS users (
                id VARCHAR(36) PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                email VARCHAR(255) NOT NULL UNIQUE,
                password_hash VARCHAR(255) NOT NULL,
                phone VARCHAR(20) NOT NULL DEFAULT '',
                role VARCHAR(20) NOT NULL DEFAULT 'user',
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);
            CREATE INDEX IF NOT EXISTS idx_users_name ON users(name);
        "#,
    },
    // Migration 4: Create tables table (physical restaurant tables)
    Migration {
        version: 4,
        name: "create_tables",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS tables (
                id VARCHAR(36) PRIMARY KEY,
                restaurant_id VARCHAR(36) NOT NULL,
                table_number VARCHAR(50) NOT NULL,
                capacity INTEGER NOT NULL,
                status VARCHAR(20) NOT NULL DEFAULT 'active',
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (restaurant_id) REFERENCES restaurants(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_tables_restaurant_id ON tables(restaurant_id);
        "#,
        up_postgres: r#"
            CREATE TABLE IF NOT EXISTS tables (
                id VARCHAR(36) PRIMARY KEY,
                restaurant_id VARCHAR(36) NOT NULL,
                table_number VARCHAR(50) NOT NULL,
                capacity BIGINT NOT NULL,
                status VARCHAR(20) NOT NULL DEFAULT 'active',
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (restaurant_id) REFERENCES restaurants(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_tables_restaurant_id ON tables(restaurant_id);
        "#,
    },
    // Migration 5: Create sessions table (bookable restaurant+date+slot offerings)
    Migration {
        version: 5,
        name: "create_sessions",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS sessions (
                id VARCHAR(36) PRIMARY KEY,
                restaurant_id VARCHAR(36) NOT NULL,
                date VARCHAR(10) NOT NULL,
                time_slot_id VARCHAR(36) NOT NULL,
                name VARCHAR(255) NOT NULL DEFAULT '',
                max_guests INTEGER NOT NULL,
                available_slots INTEGER NOT NULL,
                is_available BOOLEAN NOT NULL DEFAULT 1,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (restaurant_id) REFERENCES restaurants(id) ON DELETE CASCADE,
                FOREIGN KEY (time_slot_id) REFERENCES time_slots(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_sessions_restaurant_id ON sessions(restaurant_id);
            CREATE INDEX IF NOT EXISTS idx_sessions_created_at ON sessions(created_at);
        "#,
        up_postgres: r#"
            CREATE TABLE IF NOT EXISTS sessions (
                id VARCHAR(36) PRIMARY KEY,
                restaurant_id VARCHAR(36) NOT NULL,
                date VARCHAR(10) NOT NULL,
                time_slot_id VARCHAR(36) NOT NULL,
                name VARCHAR(255) NOT NULL DEFAULT '',
                max_guests BIGINT NOT NULL,
                available_slots BIGINT NOT NULL,
                is_available BOOLEAN NOT NULL DEFAULT TRUE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (restaurant_id) REFERENCES restaurants(id) ON DELETE CASCADE,
                FOREIGN KEY (time_slot_id) REFERENCES time_slots(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_sessions_restaurant_id ON sessions(restaurant_id);
            CREATE INDEX IF NOT EXISTS idx_sessions_created_at ON sessions(created_at);
        "#,
    },
    // Migration 6: Create bookings table
    Migration {
        version: 6,
        name: "create_bookings",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS bookings (
                id VARCHAR(36) PRIMARY KEY,
                session_id VARCHAR(36) NOT NULL,
                user_id VARCHAR(36),
                user_name VARCHAR(100) NOT NULL DEFAULT '',
                user_email VARCHAR(255) NOT NULL DEFAULT '',
                user_phone VARCHAR(20) NOT NULL DEFAULT '',
                booking_date VARCHAR(10) NOT NULL,
                number_of_guests INTEGER NOT NULL,
                status VARCHAR(50) NOT NULL DEFAULT 'confirmed',
                notes TEXT NOT NULL DEFAULT '',
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (session_id) REFERENCES sessions(id) ON DELETE CASCADE,
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE SET NULL
            );
            CREATE INDEX IF NOT EXISTS idx_bookings_session_id ON bookings(session_id);
            CREATE INDEX IF NOT EXISTS idx_bookings_user_email ON bookings(user_email);
            CREATE INDEX IF NOT EXISTS idx_bookings_created_at ON bookings(created_at);
        "#,
        up_postgres: r#"
            CREATE TABLE IF NOT EXISTS bookings (
                id VARCHAR(36) PRIMARY KEY,
                session_id VARCHAR(36) NOT NULL,
                user_id VARCHAR(36),
                user_name VARCHAR(100) NOT NULL DEFAULT '',
                user_email VARCHAR(255) NOT NULL DEFAULT '',
                user_phone VARCHAR(20) NOT NULL DEFAULT '',
                booking_date VARCHAR(10) NOT NULL,
                number_of_guests BIGINT NOT NULL,
                status VARCHAR(50) NOT NULL DEFAULT 'confirmed',
                notes TEXT NOT NULL DEFAULT '',
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (session_id) REFERENCES sessions(id) ON DELETE CASCADE,
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE SET NULL
            );
            CREATE INDEX IF NOT EXISTS idx_bookings_session_id ON bookings(session_id);
            CREATE INDEX IF NOT EXISTS idx_bookings_user_email ON bookings(user_email);
            CREATE INDEX IF NOT EXISTS idx_bookings_created_at ON bookings(created_at);
        "#,
    },
    // Migration 7: Create users_restaurant link table
    Migration {
        version: 7,
        name: "create_users_restaurant",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS users_restaurant (
                id VARCHAR(36) PRIMARY KEY,
                restaurant_id VARCHAR(36) NOT NULL,
                user_id VARCHAR(36) NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (restaurant_id) REFERENCES restaurants(id) ON DELETE CASCADE,
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_users_restaurant_user_id ON users_restaurant(user_id);
        "#,
        up_postgres: r#"
            CREATE TABLE IF NOT EXISTS users_restaurant (
                id VARCHAR(36) PRIMARY KEY,
                restaurant_id VARCHAR(36) NOT NULL,
                user_id VARCHAR(36) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (restaurant_id) REFERENCES restaurants(id) ON DELETE CASCADE,
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_users_restaurant_user_id ON users_restaurant(user_id);
        "#,
    },
];

/// Run all pending migrations
///
/// This function:
/// 1. Creates the migrations tracking table if it doesn't exist
/// 2. Checks which migrations have already been applied
/// 3. Runs any pending migrations in order
///
/// Returns the number of migrations applied.
pub async fn run_migrations(pool: &DynDatabasePool) -> Result<usize> {
    // Create migrations table
    create_migrations_table(pool).await?;

    // Get applied migrations
    let applied = get_applied_migrations(pool).await?;
    let applied_versions: Vec<i32> = applied.iter().map(|m| m.version as i32).collect();

    let mut count = 0;

    for migration in MIGRATIONS {
        if !applied_versions.contains(&migration.version) {
            tracing::info!(
                "Applying migration {}: {}",
                migration.version,
                migration.name
            );
            apply_migration(pool, migration)
                .await
                .with_context(|| format!("Failed to apply migration: {}", migration.name))?;
            count += 1;
        }
    }

    if count > 0 {
        tracing::info!("Applied {} migration(s)", count);
    } else {
        tracing::debug!("No pending migrations");
    }

    Ok(count)
}

/// Create the migrations tracking table if it doesn't exist
async fn create_migrations_table(pool: &DynDatabasePool) -> Result<()> {
    let sql = match pool.driver() {
        DatabaseDriver::Sqlite => {
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version INTEGER PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#
        }
        DatabaseDriver::Postgres => {
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version INT PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                applied_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#
        }
    };

    pool.execute(sql).await?;
    Ok(())
}

/// Get list of already applied migrations
async fn get_applied_migrations(pool: &DynDatabasePool) -> Result<Vec<MigrationRecord>> {
    match pool.driver() {
        DatabaseDriver::Sqlite => get_applied_migrations_sqlite(pool.as_sqlite().unwrap()).await,
        DatabaseDriver::Postgres => {
            get_applied_migrations_postgres(pool.as_postgres().unwrap()).await
        }
    }
}

async fn get_applied_migrations_sqlite(pool: &SqlitePool) -> Result<Vec<MigrationRecord>> {
    let rows = sqlx::query("SELECT version, name, applied_at FROM _migrations ORDER BY version")
        .fetch_all(pool)
        .await?;

    let mut records = Vec::new();
    for row in rows {
        records.push(MigrationRecord {
            version: row.get("version"),
            name: row.get("name"),
            applied_at: row.get("applied_at"),
        });
    }

    Ok(records)
}

async fn get_applied_migrations_postgres(pool: &PgPool) -> Result<Vec<MigrationRecord>> {
    let rows = sqlx::query("SELECT version, name, applied_at FROM _migrations ORDER BY version")
        .fetch_all(pool)
        .await?;

    let mut records = Vec::new();
    for row in rows {
        let version: i32 = row.get("version");
        records.push(MigrationRecord {
            version: version as i64,
            name: row.get("name"),
            applied_at: row.get("applied_at"),
        });
    }

    Ok(records)
}

/// Apply a single migration
async fn apply_migration(pool: &DynDatabasePool, migration: &Migration) -> Result<()> {
    match pool.driver() {
        DatabaseDriver::Sqlite => {
            apply_migration_sqlite(pool.as_sqlite().unwrap(), migration).await
        }
        DatabaseDriver::Postgres => {
            apply_migration_postgres(pool.as_postgres().unwrap(), migration).await
        }
    }
}

async fn apply_migration_sqlite(pool: &SqlitePool, migration: &Migration) -> Result<()> {
    // Execute migration SQL (may contain multiple statements)
    for statement in split_sql_statements(migration.up_sqlite) {
        let statement = statement.trim();
        if !statement.is_empty() {
            sqlx::query(statement)
                .execute(pool)
                .await
                .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
        }
    }

    // Record the migration
    sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(pool)
        .await?;

    Ok(())
}

async fn apply_migration_postgres(pool: &PgPool, migration: &Migration) -> Result<()> {
    // Execute migration SQL (may contain multiple statements)
    for statement in split_sql_statements(migration.up_postgres) {
        let statement = statement.trim();
        if !statement.is_empty() {
            sqlx::query(statement)
                .execute(pool)
                .await
                .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
        }
    }

    // Record the migration
    sqlx::query("INSERT INTO _migrations (version, name) VALUES ($1, $2)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(pool)
        .await?;

    Ok(())
}

/// Truncate SQL for error messages
fn truncate_sql(sql: &str) -> String {
    if sql.len() > 100 {
        format!("{}...", &sql[..100])
    } else {
        sql.to_string()
    }
}

/// Split SQL into individual statements, handling comments properly
fn split_sql_statements(sql: &str) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut current_start = 0;
    let mut in_statement = false;

    for (i, c) in sql.char_indices() {
        match c {
            ';' => {
                if in_statement {
                    let stmt = sql[current_start..i].trim();
                    if !stmt.is_empty() && !is_comment_only(stmt) {
                        statements.push(stmt);
                    }
                    in_statement = false;
                }
                current_start = i + 1;
            }
            _ if !c.is_whitespace() && !in_statement => {
                current_start = i;
                in_statement = true;
            }
            _ => {}
        }
    }

    // Handle last statement without trailing semicolon
    if in_statement {
        let stmt = sql[current_start..].trim();
        if !stmt.is_empty() && !is_comment_only(stmt) {
            statements.push(stmt);
        }
    }

    statements
}

/// Check if a string contains only SQL comments
fn is_comment_only(s: &str) -> bool {
    for line in s.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with("--") {
            return false;
        }
    }
    true
}

/// Check if migrations are up to date
pub async fn is_up_to_date(pool: &DynDatabasePool) -> Result<bool> {
    // Try to create migrations table (in case it doesn't exist)
    let _ = create_migrations_table(pool).await;

    let applied = get_applied_migrations(pool).await?;
    Ok(applied.len() == MIGRATIONS.len())
}

/// Get pending migrations count
pub async fn pending_count(pool: &DynDatabasePool) -> Result<usize> {
    // Try to create migrations table (in case it doesn't exist)
    let _ = create_migrations_table(pool).await;

    let applied = get_applied_migrations(pool).await?;
    Ok(MIGRATIONS.len().saturating_sub(applied.len()))
}

/// Get the total number of migrations defined
pub fn total_migrations() -> usize {
    MIGRATIONS.len()
}

/// Get migration by version
pub fn get_migration(version: i32) -> Option<&'static Migration> {
    MIGRATIONS.iter().find(|m| m.version == version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    #[tokio::test]
    async fn test_run_migrations() {
        let pool = create_test_pool().await.expect("Failed to create test pool");

        let count = run_migrations(&pool).await.expect("Failed to run migrations");
        assert_eq!(count, MIGRATIONS.len());

        // Running again should apply 0 migrations
        let count = run_migrations(&pool).await.expect("Failed to run migrations");
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_is_up_to_date() {
        let pool = create_test_pool().await.expect("Failed to create test pool");

        // Before migrations
        let up_to_date = is_up_to_date(&pool).await.expect("Failed to check");
        assert!(!up_to_date);

        // After migrations
        run_migrations(&pool).await.expect("Failed to run migrations");
        let up_to_date = is_up_to_date(&pool).await.expect("Failed to check");
        assert!(up_to_date);
    }

    #[tokio::test]
    async fn test_pending_count() {
        let pool = create_test_pool().await.expect("Failed to create test pool");

        // Before migrations
        let pending = pending_count(&pool).await.expect("Failed to check");
        assert_eq!(pending, MIGRATIONS.len());

        // After migrations
        run_migrations(&pool).await.expect("Failed to run migrations");
        let pending = pending_count(&pool).await.expect("Failed to check");
        assert_eq!(pending, 0);
    }

    #[tokio::test]
    async fn test_restaurants_table_created() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        run_migrations(&pool).await.expect("Failed to run migrations");

        let sqlite_pool = pool.as_sqlite().unwrap();
        let result = sqlx::query(
            "INSERT INTO restaurants (id, name, location) VALUES (?, ?, ?)",
        )
        .bind("r-1")
        .bind("The Riverside")
        .bind("12 Quay St")
        .execute(sqlite_pool)
        .await;

        assert!(result.is_ok());

        // Defaults fill in
        let row = sqlx::query("SELECT is_active, description FROM restaurants WHERE id = 'r-1'")
            .fetch_one(sqlite_pool)
            .await
            .expect("Failed to query restaurant");
        let is_active: bool = row.get("is_active");
        assert!(is_active);
    }

    #[tokio::test]
    async fn test_users_table_unique_email() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        run_migrations(&pool).await.expect("Failed to run migrations");

        let sqlite_pool = pool.as_sqlite().unwrap();
        sqlx::query("INSERT INTO users (id, name, email, password_hash) VALUES (?, ?, ?, ?)")
            .bind("u-1")
            .bind("alice")
            .bind("alice@example.com")
            .bind("hash123")
            .execute(sqlite_pool)
            .await
            .expect("Failed to insert user");

        // Same email again must violate the unique index
        let result =
            sqlx::query("INSERT INTO users (id, name, email, password_hash) VALUES (?, ?, ?, ?)")
                .bind("u-2")
                .bind("alice2")
                .bind("alice@example.com")
                .bind("hash456")
                .execute(sqlite_pool)
                .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_sessions_table_created() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        run_migrations(&pool).await.expect("Failed to run migrations");

        let sqlite_pool = pool.as_sqlite().unwrap();

        sqlx::query("INSERT INTO restaurants (id, name, location) VALUES ('r-1', 'Cafe', 'Town')")
            .execute(sqlite_pool)
            .await
            .expect("Failed to create restaurant");
        sqlx::query("INSERT INTO time_slots (id, slot_name) VALUES ('t-1', 'Dinner')")
            .execute(sqlite_pool)
            .await
            .expect("Failed to create time slot");

        let result = sqlx::query(
            "INSERT INTO sessions (id, restaurant_id, date, time_slot_id, name, max_guests, available_slots) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind("s-1")
        .bind("r-1")
        .bind("2026-01-15")
        .bind("t-1")
        .bind("Friday Dinner")
        .bind(20i64)
        .bind(20i64)
        .execute(sqlite_pool)
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_bookings_table_foreign_key() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        run_migrations(&pool).await.expect("Failed to run migrations");

        let sqlite_pool = pool.as_sqlite().unwrap();

        // Booking against a missing session must be rejected
        let result = sqlx::query(
            "INSERT INTO bookings (id, session_id, booking_date, number_of_guests) VALUES (?, ?, ?, ?)",
        )
        .bind("b-1")
        .bind("no-such-session")
        .bind("2026-01-15")
        .bind(2i64)
        .execute(sqlite_pool)
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_users_restaurant_table_created() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        run_migrations(&pool).await.expect("Failed to run migrations");

        let sqlite_pool = pool.as_sqlite().unwrap();

        sqlx::query("INSERT INTO restaurants (id, name, location) VALUES ('r-1', 'Cafe', 'Town')")
            .execute(sqlite_pool)
            .await
            .expect("Failed to create restaurant");
        sqlx::query("INSERT INTO users (id, name, email, password_hash) VALUES ('u-1', 'owner', 'owner@example.com', 'hash')")
            .execute(sqlite_pool)
            .await
            .expect("Failed to create user");

        let result = sqlx::query(
            "INSERT INTO users_restaurant (id, restaurant_id, user_id) VALUES (?, ?, ?)",
        )
        .bind("ur-1")
        .bind("r-1")
        .bind("u-1")
        .execute(sqlite_pool)
        .await;

        assert!(result.is_ok());
    }

    #[test]
    fn test_split_sql_statements() {
        let sql = r#"
            CREATE TABLE a (id INT);
            -- a comment
            CREATE INDEX idx_a ON a(id);
        "#;
        let statements = split_sql_statements(sql);
        assert_eq!(statements.len(), 2);
        assert!(statements[0].starts_with("CREATE TABLE"));
        assert!(statements[1].contains("CREATE INDEX"));
    }

    #[test]
    fn test_migrations_have_unique_versions() {
        let mut versions: Vec<i32> = MIGRATIONS.iter().map(|m| m.version).collect();
        versions.sort_unstable();
        versions.dedup();
        assert_eq!(versions.len(), MIGRATIONS.len());
    }

    #[test]
    fn test_get_migration() {
        assert!(get_migration(1).is_some());
        assert_eq!(get_migration(1).unwrap().name, "create_restaurants");
        assert!(get_migration(999).is_none());
    }
}
