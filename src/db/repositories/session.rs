//! Session repository
//!
//! Database operations for sessions, including the two seat-accounting
//! primitives:
//!
//! - `reserve_slots` takes seats with a single conditional UPDATE, so two
//!   concurrent bookings can never both draw down the same capacity.
//! - `restore_slots` returns seats unconditionally and re-opens the
//!   session, with no cap check.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::Session;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row, SqlitePool};
use std::sync::Arc;

/// Session repository trait
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Create a new session
    async fn create(&self, session: &Session) -> Result<Session>;

    /// Get session by ID
    async fn get_by_id(&self, id: &str) -> Result<Option<Session>>;

    /// List sessions, newest first, optionally filtered by restaurant
    async fn list(&self, restaurant_id: Option<&str>) -> Result<Vec<Session>>;

    /// Overwrite the scheduling fields of a session
    async fn update(&self, session: &Session) -> Result<Session>;

    /// Delete a session (and, via foreign keys, its bookings)
    async fn delete(&self, id: &str) -> Result<()>;

    /// Atomically take `guests` seats from a session.
    ///
    /// Returns `false` without changing anything when fewer than `guests`
    /// seats remain. `is_available` drops to false exactly when the
    /// remaining count reaches zero.
    async fn reserve_slots(&self, id: &str, guests: i64) -> Result<bool>;

    /// Return `guests` seats to a session and force it available again.
    async fn restore_slots(&self, id: &str, guests: i64) -> Result<()>;
}

/// SQLx-based session repository implementation
pub struct SqlxSessionRepository {
    pool: DynDatabasePool,
}

impl SqlxSessionRepository {
    /// Create a new SQLx session repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn SessionRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl SessionRepository for SqlxSessionRepository {
    async fn create(&self, session: &Session) -> Result<Session> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                create_session_sqlite(self.pool.as_sqlite().unwrap(), session).await
            }
            DatabaseDriver::Postgres => {
                create_session_postgres(self.pool.as_postgres().unwrap(), session).await
            }
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Session>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_session_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await
            }
            DatabaseDriver::Postgres => {
                get_session_by_id_postgres(self.pool.as_postgres().unwrap(), id).await
            }
        }
    }

    async fn list(&self, restaurant_id: Option<&str>) -> Result<Vec<Session>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_sessions_sqlite(self.pool.as_sqlite().unwrap(), restaurant_id).await
            }
            DatabaseDriver::Postgres => {
                list_sessions_postgres(self.pool.as_postgres().unwrap(), restaurant_id).await
            }
        }
    }

    async fn update(&self, session: &Session) -> Result<Session> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                update_session_sqlite(self.pool.as_sqlite().unwrap(), session).await
            }
            DatabaseDriver::Postgres => {
                update_session_postgres(self.pool.as_postgres().unwrap(), session).await
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => delete_session_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Postgres => {
                delete_session_postgres(self.pool.as_postgres().unwrap(), id).await
            }
        }
    }

    async fn reserve_slots(&self, id: &str, guests: i64) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                reserve_slots_sqlite(self.pool.as_sqlite().unwrap(), id, guests).await
            }
            DatabaseDriver::Postgres => {
                reserve_slots_postgres(self.pool.as_postgres().unwrap(), id, guests).await
            }
        }
    }

    async fn restore_slots(&self, id: &str, guests: i64) -> Result<()> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                restore_slots_sqlite(self.pool.as_sqlite().unwrap(), id, guests).await
            }
            DatabaseDriver::Postgres => {
                restore_slots_postgres(self.pool.as_postgres().unwrap(), id, guests).await
            }
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_session_sqlite(pool: &SqlitePool, session: &Session) -> Result<Session> {
    sqlx::query(
        r#"
        INSERT INTO sessions (id, restaurant_id, date, time_slot_id, name, max_guests,
                              available_slots, is_available, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&session.id)
    .bind(&session.restaurant_id)
    .bind(&session.date)
    .bind(&session.time_slot_id)
    .bind(&session.name)
    .bind(session.max_guests)
    .bind(session.available_slots)
    .bind(session.is_available)
    .bind(session.created_at)
    .bind(session.updated_at)
    .execute(pool)
    .await
    .context("Failed to create session")?;

    Ok(session.clone())
}

async fn get_session_by_id_sqlite(pool: &SqlitePool, id: &str) -> Result<Option<Session>> {
    let row = sqlx::query(
        r#"
        SELECT id, restaurant_id, date, time_slot_id, name, max_guests,
               available_slots, is_available, created_at, updated_at
        FROM sessions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get session by ID")?;

    Ok(row.map(|row| row_to_session_sqlite(&row)))
}

async fn list_sessions_sqlite(
    pool: &SqlitePool,
    restaurant_id: Option<&str>,
) -> Result<Vec<Session>> {
    let rows = match restaurant_id {
        Some(restaurant_id) => {
            sqlx::query(
                r#"
                SELECT id, restaurant_id, date, time_slot_id, name, max_guests,
                       available_slots, is_available, created_at, updated_at
                FROM sessions
                WHERE restaurant_id = ?
                ORDER BY created_at DESC
                "#,
            )
            .bind(restaurant_id)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query(
                r#"
                SELECT id, restaurant_id, date, time_slot_id, name, max_guests,
                       available_slots, is_available, created_at, updated_at
                FROM sessions
                ORDER BY created_at DESC
                "#,
            )
            .fetch_all(pool)
            .await
        }
    }
    .context("Failed to list sessions")?;

    Ok(rows.iter().map(row_to_session_sqlite).collect())
}

async fn update_session_sqlite(pool: &SqlitePool, session: &Session) -> Result<Session> {
    let now = Utc::now();

    sqlx::query(
        r#"
        UPDATE sessions
        SET time_slot_id = ?, name = ?, date = ?, max_guests = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&session.time_slot_id)
    .bind(&session.name)
    .bind(&session.date)
    .bind(session.max_guests)
    .bind(now)
    .bind(&session.id)
    .execute(pool)
    .await
    .context("Failed to update session")?;

    get_session_by_id_sqlite(pool, &session.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Session not found after update"))
}

async fn delete_session_sqlite(pool: &SqlitePool, id: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete session")?;

    Ok(())
}

async fn reserve_slots_sqlite(pool: &SqlitePool, id: &str, guests: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE sessions
        SET available_slots = available_slots - ?,
            is_available = available_slots - ? > 0,
            updated_at = ?
        WHERE id = ? AND available_slots >= ?
        "#,
    )
    .bind(guests)
    .bind(guests)
    .bind(Utc::now())
    .bind(id)
    .bind(guests)
    .execute(pool)
    .await
    .context("Failed to reserve session slots")?;

    Ok(result.rows_affected() > 0)
}

async fn restore_slots_sqlite(pool: &SqlitePool, id: &str, guests: i64) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE sessions
        SET available_slots = available_slots + ?,
            is_available = TRUE,
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(guests)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await
    .context("Failed to restore session slots")?;

    Ok(())
}

fn row_to_session_sqlite(row: &sqlx::sqlite::SqliteRow) -> Session {
    Session {
        id: row.get("id"),
        restaurant_id: row.get("restaurant_id"),
        date: row.get("date"),
        time_slot_id: row.get("time_slot_id"),
        name: row.get("name"),
        max_guests: row.get("max_guests"),
        available_slots: row.get("available_slots"),
        is_available: row.get("is_available"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

// ============================================================================
// PostgreSQL implementations
// ============================================================================

async fn create_session_postgres(pool: &PgPool, session: &Session) -> Result<Session> {
    sqlx::query(
        r#"
        INSERT INTO sessions (id, restaurant_id, date, time_slot_id, name, max_guests,
                              available_slots, is_available, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(&session.id)
    .bind(&session.restaurant_id)
    .bind(&session.date)
    .bind(&session.time_slot_id)
    .bind(&session.name)
    .bind(session.max_guests)
    .bind(session.available_slots)
    .bind(session.is_available)
    .bind(session.created_at)
    .bind(session.updated_at)
    .execute(pool)
    .await
    .context("Failed to create session")?;

    Ok(session.clone())
}

async fn get_session_by_id_postgres(pool: &PgPool, id: &str) -> Result<Option<Session>> {
    let row = sqlx::query(
        r#"
        SELECT id, restaurant_id, date, time_slot_id, name, max_guests,
               available_slots, is_available, created_at, updated_at
        FROM sessions
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get session by ID")?;

    Ok(row.map(|row| row_to_session_postgres(&row)))
}

async fn list_sessions_postgres(
    pool: &PgPool,
    restaurant_id: Option<&str>,
) -> Result<Vec<Session>> {
    let rows = match restaurant_id {
        Some(restaurant_id) => {
            sqlx::query(
                r#"
                SELECT id, restaurant_id, date, time_slot_id, name, max_guests,
                       available_slots, is_available, created_at, updated_at
                FROM sessions
                WHERE restaurant_id = $1
                ORDER BY created_at DESC
                "#,
            )
            .bind(restaurant_id)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query(
                r#"
                SELECT id, restaurant_id, date, time_slot_id, name, max_guests,
                       available_slots, is_available, created_at, updated_at
                FROM sessions
                ORDER BY created_at DESC
                "#,
            )
            .fetch_all(pool)
            .await
        }
    }
    .context("Failed to list sessions")?;

    Ok(rows.iter().map(row_to_session_postgres).collect())
}

async fn update_session_postgres(pool: &PgPool, session: &Session) -> Result<Session> {
    let now = Utc::now();

    sqlx::query(
        r#"
        UPDATE sessions
        SET time_slot_id = $1, name = $2, date = $3, max_guests = $4, updated_at = $5
        WHERE id = $6
        "#,
    )
    .bind(&session.time_slot_id)
    .bind(&session.name)
    .bind(&session.date)
    .bind(session.max_guests)
    .bind(now)
    .bind(&session.id)
    .execute(pool)
    .await
    .context("Failed to update session")?;

    get_session_by_id_postgres(pool, &session.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Session not found after update"))
}

async fn delete_session_postgres(pool: &PgPool, id: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete session")?;

    Ok(())
}

async fn reserve_slots_postgres(pool: &PgPool, id: &str, guests: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE sessions
        SET available_slots = available_slots - $1,
            is_available = available_slots - $1 > 0,
            updated_at = $2
        WHERE id = $3 AND available_slots >= $1
        "#,
    )
    .bind(guests)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await
    .context("Failed to reserve session slots")?;

    Ok(result.rows_affected() > 0)
}

async fn restore_slots_postgres(pool: &PgPool, id: &str, guests: i64) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE sessions
        SET available_slots = available_slots + $1,
            is_available = TRUE,
            updated_at = $2
        WHERE id = $3
        "#,
    )
    .bind(guests)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await
    .context("Failed to restore session slots")?;

    Ok(())
}

fn row_to_session_postgres(row: &sqlx::postgres::PgRow) -> Session {
    Session {
        id: row.get("id"),
        restaurant_id: row.get("restaurant_id"),
        date: row.get("date"),
        time_slot_id: row.get("time_slot_id"),
        name: row.get("name"),
        max_guests: row.get("max_guests"),
        available_slots: row.get("available_slots"),
        is_available: row.get("is_available"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::restaurant::{RestaurantRepository, SqlxRestaurantRepository};
    use crate::db::repositories::time_slot::{SqlxTimeSlotRepository, TimeSlotRepository};
    use crate::db::{create_test_pool, migrations};
    use crate::models::{Restaurant, TimeSlot};

    async fn setup() -> (DynDatabasePool, SqlxSessionRepository, Restaurant, TimeSlot) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let restaurant = SqlxRestaurantRepository::new(pool.clone())
            .create(&Restaurant::new("Cafe".to_string(), "Town".to_string()))
            .await
            .expect("Failed to create restaurant");
        let slot = SqlxTimeSlotRepository::new(pool.clone())
            .create(&TimeSlot::new("Dinner".to_string()))
            .await
            .expect("Failed to create time slot");

        let repo = SqlxSessionRepository::new(pool.clone());
        (pool, repo, restaurant, slot)
    }

    fn test_session(restaurant: &Restaurant, slot: &TimeSlot, max_guests: i64) -> Session {
        Session::new(
            restaurant.id.clone(),
            "2026-01-15".to_string(),
            slot.id.clone(),
            "Friday Dinner".to_string(),
            max_guests,
        )
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let (_pool, repo, restaurant, slot) = setup().await;
        let session = test_session(&restaurant, &slot, 20);

        let created = repo.create(&session).await.expect("Failed to create session");
        let found = repo
            .get_by_id(&created.id)
            .await
            .expect("Failed to get session")
            .expect("Session not found");

        assert_eq!(found.name, "Friday Dinner");
        assert_eq!(found.max_guests, 20);
        assert_eq!(found.available_slots, 20);
        assert!(found.is_available);
    }

    #[tokio::test]
    async fn test_list_sessions_newest_first() {
        let (_pool, repo, restaurant, slot) = setup().await;

        let mut first = test_session(&restaurant, &slot, 10);
        first.name = "first".to_string();
        let mut second = test_session(&restaurant, &slot, 10);
        second.name = "second".to_string();
        second.created_at = first.created_at + chrono::Duration::seconds(5);

        repo.create(&first).await.expect("Failed to create session");
        repo.create(&second).await.expect("Failed to create session");

        let listed = repo.list(None).await.expect("Failed to list sessions");

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "second");
        assert_eq!(listed[1].name, "first");
    }

    #[tokio::test]
    async fn test_list_sessions_filter_by_restaurant() {
        let (pool, repo, restaurant, slot) = setup().await;

        let other = SqlxRestaurantRepository::new(pool.clone())
            .create(&Restaurant::new("Other".to_string(), "Elsewhere".to_string()))
            .await
            .expect("Failed to create restaurant");

        repo.create(&test_session(&restaurant, &slot, 10))
            .await
            .expect("Failed to create session");
        repo.create(&test_session(&other, &slot, 10))
            .await
            .expect("Failed to create session");

        let listed = repo
            .list(Some(&restaurant.id))
            .await
            .expect("Failed to list sessions");

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].restaurant_id, restaurant.id);
    }

    #[tokio::test]
    async fn test_update_overwrites_scheduling_fields_only() {
        let (pool, repo, restaurant, slot) = setup().await;
        let created = repo
            .create(&test_session(&restaurant, &slot, 20))
            .await
            .expect("Failed to create session");

        // Draw down some capacity first
        assert!(repo
            .reserve_slots(&created.id, 5)
            .await
            .expect("Failed to reserve slots"));

        let new_slot = SqlxTimeSlotRepository::new(pool.clone())
            .create(&TimeSlot::new("Lunch".to_string()))
            .await
            .expect("Failed to create time slot");

        let mut changed = created.clone();
        changed.time_slot_id = new_slot.id.clone();
        changed.name = "Moved".to_string();
        changed.date = "2026-02-01".to_string();
        changed.max_guests = 30;

        let updated = repo.update(&changed).await.expect("Failed to update session");

        assert_eq!(updated.name, "Moved");
        assert_eq!(updated.max_guests, 30);
        // Seat accounting is untouched by updates
        assert_eq!(updated.available_slots, 15);
        assert!(updated.is_available);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let (_pool, repo, restaurant, slot) = setup().await;
        let created = repo
            .create(&test_session(&restaurant, &slot, 10))
            .await
            .expect("Failed to create session");

        repo.delete(&created.id).await.expect("Failed to delete session");

        let found = repo.get_by_id(&created.id).await.expect("Failed to get session");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_reserve_slots_decrements() {
        let (_pool, repo, restaurant, slot) = setup().await;
        let created = repo
            .create(&test_session(&restaurant, &slot, 10))
            .await
            .expect("Failed to create session");

        let taken = repo
            .reserve_slots(&created.id, 4)
            .await
            .expect("Failed to reserve slots");
        assert!(taken);

        let session = repo
            .get_by_id(&created.id)
            .await
            .expect("Failed to get session")
            .expect("Session not found");
        assert_eq!(session.available_slots, 6);
        assert!(session.is_available);
    }

    #[tokio::test]
    async fn test_reserve_slots_to_zero_closes_session() {
        let (_pool, repo, restaurant, slot) = setup().await;
        let created = repo
            .create(&test_session(&restaurant, &slot, 4))
            .await
            .expect("Failed to create session");

        assert!(repo
            .reserve_slots(&created.id, 4)
            .await
            .expect("Failed to reserve slots"));

        let session = repo
            .get_by_id(&created.id)
            .await
            .expect("Failed to get session")
            .expect("Session not found");
        assert_eq!(session.available_slots, 0);
        assert!(!session.is_available);
    }

    #[tokio::test]
    async fn test_reserve_slots_insufficient_capacity() {
        let (_pool, repo, restaurant, slot) = setup().await;
        let created = repo
            .create(&test_session(&restaurant, &slot, 3))
            .await
            .expect("Failed to create session");

        let taken = repo
            .reserve_slots(&created.id, 4)
            .await
            .expect("Failed to reserve slots");
        assert!(!taken);

        // Nothing changed
        let session = repo
            .get_by_id(&created.id)
            .await
            .expect("Failed to get session")
            .expect("Session not found");
        assert_eq!(session.available_slots, 3);
        assert!(session.is_available);
    }

    #[tokio::test]
    async fn test_reserve_slots_missing_session() {
        let (_pool, repo, _restaurant, _slot) = setup().await;

        let taken = repo
            .reserve_slots("missing", 1)
            .await
            .expect("Failed to reserve slots");
        assert!(!taken);
    }

    #[tokio::test]
    async fn test_restore_slots_reopens_session() {
        let (_pool, repo, restaurant, slot) = setup().await;
        let created = repo
            .create(&test_session(&restaurant, &slot, 4))
            .await
            .expect("Failed to create session");

        assert!(repo
            .reserve_slots(&created.id, 4)
            .await
            .expect("Failed to reserve slots"));
        repo.restore_slots(&created.id, 4)
            .await
            .expect("Failed to restore slots");

        let session = repo
            .get_by_id(&created.id)
            .await
            .expect("Failed to get session")
            .expect("Session not found");
        assert_eq!(session.available_slots, 4);
        assert!(session.is_available);
    }

    #[tokio::test]
    async fn test_restore_slots_can_exceed_max_guests() {
        let (_pool, repo, restaurant, slot) = setup().await;
        let created = repo
            .create(&test_session(&restaurant, &slot, 4))
            .await
            .expect("Failed to create session");

        // No cap check on restore
        repo.restore_slots(&created.id, 10)
            .await
            .expect("Failed to restore slots");

        let session = repo
            .get_by_id(&created.id)
            .await
            .expect("Failed to get session")
            .expect("Session not found");
        assert_eq!(session.available_slots, 14);
    }

    #[tokio::test]
    async fn test_concurrent_reserves_never_oversubscribe() {
        let (_pool, repo, restaurant, slot) = setup().await;
        let created = repo
            .create(&test_session(&restaurant, &slot, 10))
            .await
            .expect("Failed to create session");

        let repo = Arc::new(repo);
        let mut handles = Vec::new();
        for _ in 0..8 {
            let repo = Arc::clone(&repo);
            let id = created.id.clone();
            handles.push(tokio::spawn(async move {
                repo.reserve_slots(&id, 3).await.expect("Failed to reserve slots")
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.expect("Task panicked") {
                successes += 1;
            }
        }

        // 10 seats, 3 per booking: at most 3 reservations can win
        assert_eq!(successes, 3);

        let session = repo
            .get_by_id(&created.id)
            .await
            .expect("Failed to get session")
            .expect("Session not found");
        assert_eq!(session.available_slots, 1);
        assert!(session.is_available);
    }
}
