//! Table repository

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{Restaurant, Table, TableWithRestaurant};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, SqlitePool};
use std::sync::Arc;

/// Table repository trait
#[async_trait]
pub trait TableRepository: Send + Sync {
    /// Create a new table
    async fn create(&self, table: &Table) -> Result<Table>;

    /// List all tables joined with their restaurant
    async fn list_with_restaurant(&self) -> Result<Vec<TableWithRestaurant>>;

    /// List tables belonging to one restaurant
    async fn list_by_restaurant(&self, restaurant_id: &str) -> Result<Vec<Table>>;
}

/// SQLx-based table repository implementation
pub struct SqlxTableRepository {
    pool: DynDatabasePool,
}

impl SqlxTableRepository {
    /// Create a new SQLx table repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn TableRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl TableRepository for SqlxTableRepository {
    async fn create(&self, table: &Table) -> Result<Table> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_table_sqlite(self.pool.as_sqlite().unwrap(), table).await,
            DatabaseDriver::Postgres => {
                create_table_postgres(self.pool.as_postgres().unwrap(), table).await
            }
        }
    }

    async fn list_with_restaurant(&self) -> Result<Vec<TableWithRestaurant>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_tables_with_restaurant_sqlite(self.pool.as_sqlite().unwrap()).await
            }
            DatabaseDriver::Postgres => {
                list_tables_with_restaurant_postgres(self.pool.as_postgres().unwrap()).await
            }
        }
    }

    async fn list_by_restaurant(&self, restaurant_id: &str) -> Result<Vec<Table>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_tables_by_restaurant_sqlite(self.pool.as_sqlite().unwrap(), restaurant_id).await
            }
            DatabaseDriver::Postgres => {
                list_tables_by_restaurant_postgres(self.pool.as_postgres().unwrap(), restaurant_id)
                    .await
            }
        }
    }
}

const TABLE_COLUMNS: &str = "t.id, t.restaurant_id, t.table_number, t.capacity, t.status, t.created_at, t.updated_at";

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_table_sqlite(pool: &SqlitePool, table: &Table) -> Result<Table> {
    sqlx::query(
        r#"
        INSERT INTO tables (id, restaurant_id, table_number, capacity, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&table.id)
    .bind(&table.restaurant_id)
    .bind(&table.table_number)
    .bind(table.capacity)
    .bind(&table.status)
    .bind(table.created_at)
    .bind(table.updated_at)
    .execute(pool)
    .await
    .context("Failed to create table")?;

    Ok(table.clone())
}

async fn list_tables_with_restaurant_sqlite(pool: &SqlitePool) -> Result<Vec<TableWithRestaurant>> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT {TABLE_COLUMNS},
               r.id as r_id, r.name as r_name, r.location as r_location,
               r.description as r_description, r.phone as r_phone,
               r.email as r_email, r.is_active as r_is_active
        FROM tables t
        INNER JOIN restaurants r ON r.id = t.restaurant_id
        ORDER BY t.created_at
        "#
    ))
    .fetch_all(pool)
    .await
    .context("Failed to list tables")?;

    Ok(rows
        .iter()
        .map(|row| TableWithRestaurant {
            table: row_to_table_sqlite(row),
            restaurant: joined_restaurant_sqlite(row),
        })
        .collect())
}

async fn list_tables_by_restaurant_sqlite(
    pool: &SqlitePool,
    restaurant_id: &str,
) -> Result<Vec<Table>> {
    let rows = sqlx::query(&format!(
        "SELECT {TABLE_COLUMNS} FROM tables t WHERE t.restaurant_id = ? ORDER BY t.created_at"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await
    .context("Failed to list tables for restaurant")?;

    Ok(rows.iter().map(row_to_table_sqlite).collect())
}

fn row_to_table_sqlite(row: &sqlx::sqlite::SqliteRow) -> Table {
    Table {
        id: row.get("id"),
        restaurant_id: row.get("restaurant_id"),
        table_number: row.get("table_number"),
        capacity: row.get("capacity"),
        status: row.get("status"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn joined_restaurant_sqlite(row: &sqlx::sqlite::SqliteRow) -> Restaurant {
    Restaurant {
        id: row.get("r_id"),
        name: row.get("r_name"),
        location: row.get("r_location"),
        description: row.get("r_description"),
        phone: row.get("r_phone"),
        email: row.get("r_email"),
        is_active: row.get("r_is_active"),
    }
}

// ============================================================================
// PostgreSQL implementations
// ============================================================================

async fn create_table_postgres(pool: &PgPool, table: &Table) -> Result<Table> {
    sqlx::query(
        r#"
        INSERT INTO tables (id, restaurant_id, table_number, capacity, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(&table.id)
    .bind(&table.restaurant_id)
    .bind(&table.table_number)
    .bind(table.capacity)
    .bind(&table.status)
    .bind(table.created_at)
    .bind(table.updated_at)
    .execute(pool)
    .await
    .context("Failed to create table")?;

    Ok(table.clone())
}

async fn list_tables_with_restaurant_postgres(pool: &PgPool) -> Result<Vec<TableWithRestaurant>> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT {TABLE_COLUMNS},
               r.id as r_id, r.name as r_name, r.location as r_location,
               r.description as r_description, r.phone as r_phone,
               r.email as r_email, r.is_active as r_is_active
        FROM tables t
        INNER JOIN restaurants r ON r.id = t.restaurant_id
        ORDER BY t.created_at
        "#
    ))
    .fetch_all(pool)
    .await
    .context("Failed to list tables")?;

    Ok(rows
        .iter()
        .map(|row| TableWithRestaurant {
            table: row_to_table_postgres(row),
            restaurant: joined_restaurant_postgres(row),
        })
        .collect())
}

async fn list_tables_by_restaurant_postgres(
    pool: &PgPool,
    restaurant_id: &str,
) -> Result<Vec<Table>> {
    let rows = sqlx::query(&format!(
        "SELECT {TABLE_COLUMNS} FROM tables t WHERE t.restaurant_id = $1 ORDER BY t.created_at"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await
    .context("Failed to list tables for restaurant")?;

    Ok(rows.iter().map(row_to_table_postgres).collect())
}

fn row_to_table_postgres(row: &sqlx::postgres::PgRow) -> Table {
    Table {
        id: row.get("id"),
        restaurant_id: row.get("restaurant_id"),
        table_number: row.get("table_number"),
        capacity: row.get("capacity"),
        status: row.get("status"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn joined_restaurant_postgres(row: &sqlx::postgres::PgRow) -> Restaurant {
    Restaurant {
        id: row.get("r_id"),
        name: row.get("r_name"),
        location: row.get("r_location"),
        description: row.get("r_description"),
        phone: row.get("r_phone"),
        email: row.get("r_email"),
        is_active: row.get("r_is_active"),
    }
}
