//! Time slot repository

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::TimeSlot;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, SqlitePool};
use std::sync::Arc;

/// Time slot repository trait
#[async_trait]
pub trait TimeSlotRepository: Send + Sync {
    /// Create a new time slot
    async fn create(&self, slot: &TimeSlot) -> Result<TimeSlot>;

    /// Get time slot by ID
    async fn get_by_id(&self, id: &str) -> Result<Option<TimeSlot>>;

    /// List all time slots
    async fn list(&self) -> Result<Vec<TimeSlot>>;
}

/// SQLx-based time slot repository implementation
pub struct SqlxTimeSlotRepository {
    pool: DynDatabasePool,
}

impl SqlxTimeSlotRepository {
    /// Create a new SQLx time slot repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn TimeSlotRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl TimeSlotRepository for SqlxTimeSlotRepository {
    async fn create(&self, slot: &TimeSlot) -> Result<TimeSlot> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                create_time_slot_sqlite(self.pool.as_sqlite().unwrap(), slot).await
            }
            DatabaseDriver::Postgres => {
                create_time_slot_postgres(self.pool.as_postgres().unwrap(), slot).await
            }
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<TimeSlot>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_time_slot_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await
            }
            DatabaseDriver::Postgres => {
                get_time_slot_by_id_postgres(self.pool.as_postgres().unwrap(), id).await
            }
        }
    }

    async fn list(&self) -> Result<Vec<TimeSlot>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_time_slots_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Postgres => {
                list_time_slots_postgres(self.pool.as_postgres().unwrap()).await
            }
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_time_slot_sqlite(pool: &SqlitePool, slot: &TimeSlot) -> Result<TimeSlot> {
    sqlx::query("INSERT INTO time_slots (id, slot_name, created_at) VALUES (?, ?, ?)")
        .bind(&slot.id)
        .bind(&slot.slot_name)
        .bind(slot.created_at)
        .execute(pool)
        .await
        .context("Failed to create time slot")?;

    Ok(slot.clone())
}

async fn get_time_slot_by_id_sqlite(pool: &SqlitePool, id: &str) -> Result<Option<TimeSlot>> {
    let row = sqlx::query("SELECT id, slot_name, created_at FROM time_slots WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get time slot by ID")?;

    Ok(row.map(|row| row_to_time_slot_sqlite(&row)))
}

async fn list_time_slots_sqlite(pool: &SqlitePool) -> Result<Vec<TimeSlot>> {
    let rows = sqlx::query("SELECT id, slot_name, created_at FROM time_slots ORDER BY created_at")
        .fetch_all(pool)
        .await
        .context("Failed to list time slots")?;

    Ok(rows.iter().map(row_to_time_slot_sqlite).collect())
}

fn row_to_time_slot_sqlite(row: &sqlx::sqlite::SqliteRow) -> TimeSlot {
    TimeSlot {
        id: row.get("id"),
        slot_name: row.get("slot_name"),
        created_at: row.get("created_at"),
    }
}

// ============================================================================
// PostgreSQL implementations
// ============================================================================

async fn create_time_slot_postgres(pool: &PgPool, slot: &TimeSlot) -> Result<TimeSlot> {
    sqlx::query("INSERT INTO time_slots (id, slot_name, created_at) VALUES ($1, $2, $3)")
        .bind(&slot.id)
        .bind(&slot.slot_name)
        .bind(slot.created_at)
        .execute(pool)
        .await
        .context("Failed to create time slot")?;

    Ok(slot.clone())
}

async fn get_time_slot_by_id_postgres(pool: &PgPool, id: &str) -> Result<Option<TimeSlot>> {
    let row = sqlx::query("SELECT id, slot_name, created_at FROM time_slots WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get time slot by ID")?;

    Ok(row.map(|row| row_to_time_slot_postgres(&row)))
}

async fn list_time_slots_postgres(pool: &PgPool) -> Result<Vec<TimeSlot>> {
    let rows = sqlx::query("SELECT id, slot_name, created_at FROM time_slots ORDER BY created_at")
        .fetch_all(pool)
        .await
        .context("Failed to list time slots")?;

    Ok(rows.iter().map(row_to_time_slot_postgres).collect())
}

fn row_to_time_slot_postgres(row: &sqlx::postgres::PgRow) -> TimeSlot {
    TimeSlot {
        id: row.get("id"),
        slot_name: row.get("slot_name"),
        created_at: row.get("created_at"),
    }
}
