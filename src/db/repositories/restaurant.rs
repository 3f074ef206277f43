//! Restaurant repository
//!
//! Database operations for restaurants, including the users_restaurant
//! link table that maps owning users to their restaurant.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::Restaurant;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, SqlitePool};
use std::sync::Arc;
use uuid::Uuid;

/// Restaurant repository trait
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Create a new restaurant
    async fn create(&self, restaurant: &Restaurant) -> Result<Restaurant>;

    /// Get restaurant by ID
    async fn get_by_id(&self, id: &str) -> Result<Option<Restaurant>>;

    /// List all restaurants
    async fn list(&self) -> Result<Vec<Restaurant>>;

    /// Get the restaurant linked to an owning user
    async fn get_for_user(&self, user_id: &str) -> Result<Option<Restaurant>>;

    /// Link a user to a restaurant as its owner
    async fn link_user(&self, user_id: &str, restaurant_id: &str) -> Result<()>;
}

/// SQLx-based restaurant repository implementation
pub struct SqlxRestaurantRepository {
    pool: DynDatabasePool,
}

impl SqlxRestaurantRepository {
    /// Create a new SQLx restaurant repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn RestaurantRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl RestaurantRepository for SqlxRestaurantRepository {
    async fn create(&self, restaurant: &Restaurant) -> Result<Restaurant> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                create_restaurant_sqlite(self.pool.as_sqlite().unwrap(), restaurant).await
            }
            DatabaseDriver::Postgres => {
                create_restaurant_postgres(self.pool.as_postgres().unwrap(), restaurant).await
            }
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Restaurant>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_restaurant_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await
            }
            DatabaseDriver::Postgres => {
                get_restaurant_by_id_postgres(self.pool.as_postgres().unwrap(), id).await
            }
        }
    }

    async fn list(&self) -> Result<Vec<Restaurant>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_restaurants_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Postgres => {
                list_restaurants_postgres(self.pool.as_postgres().unwrap()).await
            }
        }
    }

    async fn get_for_user(&self, user_id: &str) -> Result<Option<Restaurant>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_restaurant_for_user_sqlite(self.pool.as_sqlite().unwrap(), user_id).await
            }
            DatabaseDriver::Postgres => {
                get_restaurant_for_user_postgres(self.pool.as_postgres().unwrap(), user_id).await
            }
        }
    }

    async fn link_user(&self, user_id: &str, restaurant_id: &str) -> Result<()> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                link_user_sqlite(self.pool.as_sqlite().unwrap(), user_id, restaurant_id).await
            }
            DatabaseDriver::Postgres => {
                link_user_postgres(self.pool.as_postgres().unwrap(), user_id, restaurant_id).await
            }
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_restaurant_sqlite(pool: &SqlitePool, restaurant: &Restaurant) -> Result<Restaurant> {
    sqlx::query(
        r#"
        INSERT INTO restaurants (id, name, location, description, phone, email, is_active)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&restaurant.id)
    .bind(&restaurant.name)
    .bind(&restaurant.location)
    .bind(&restaurant.description)
    .bind(&restaurant.phone)
    .bind(&restaurant.email)
    .bind(restaurant.is_active)
    .execute(pool)
    .await
    .context("Failed to create restaurant")?;

    Ok(restaurant.clone())
}

async fn get_restaurant_by_id_sqlite(pool: &SqlitePool, id: &str) -> Result<Option<Restaurant>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, location, description, phone, email, is_active
        FROM restaurants
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get restaurant by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_restaurant_sqlite(&row))),
        None => Ok(None),
    }
}

async fn list_restaurants_sqlite(pool: &SqlitePool) -> Result<Vec<Restaurant>> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, location, description, phone, email, is_active
        FROM restaurants
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await
    .context("Failed to list restaurants")?;

    Ok(rows.iter().map(row_to_restaurant_sqlite).collect())
}

async fn get_restaurant_for_user_sqlite(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Option<Restaurant>> {
    let row = sqlx::query(
        r#"
        SELECT r.id, r.name, r.location, r.description, r.phone, r.email, r.is_active
        FROM restaurants r
        INNER JOIN users_restaurant ur ON ur.restaurant_id = r.id
        WHERE ur.user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .context("Failed to get restaurant for user")?;

    match row {
        Some(row) => Ok(Some(row_to_restaurant_sqlite(&row))),
        None => Ok(None),
    }
}

async fn link_user_sqlite(pool: &SqlitePool, user_id: &str, restaurant_id: &str) -> Result<()> {
    sqlx::query("INSERT INTO users_restaurant (id, restaurant_id, user_id) VALUES (?, ?, ?)")
        .bind(Uuid::new_v4().to_string())
        .bind(restaurant_id)
        .bind(user_id)
        .execute(pool)
        .await
        .context("Failed to link user to restaurant")?;

    Ok(())
}

fn row_to_restaurant_sqlite(row: &sqlx::sqlite::SqliteRow) -> Restaurant {
    Restaurant {
        id: row.get("id"),
        name: row.get("name"),
        location: row.get("location"),
        description: row.get("description"),
        phone: row.get("phone"),
        email: row.get("email"),
        is_active: row.get("is_active"),
    }
}

// ============================================================================
// PostgreSQL implementations
// ============================================================================

async fn create_restaurant_postgres(pool: &PgPool, restaurant: &Restaurant) -> Result<Restaurant> {
    sqlx::query(
        r#"
        INSERT INTO restaurants (id, name, location, description, phone, email, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(&restaurant.id)
    .bind(&restaurant.name)
    .bind(&restaurant.location)
    .bind(&restaurant.description)
    .bind(&restaurant.phone)
    .bind(&restaurant.email)
    .bind(restaurant.is_active)
    .execute(pool)
    .await
    .context("Failed to create restaurant")?;

    Ok(restaurant.clone())
}

async fn get_restaurant_by_id_postgres(pool: &PgPool, id: &str) -> Result<Option<Restaurant>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, location, description, phone, email, is_active
        FROM restaurants
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get restaurant by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_restaurant_postgres(&row))),
        None => Ok(None),
    }
}

async fn list_restaurants_postgres(pool: &PgPool) -> Result<Vec<Restaurant>> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, location, description, phone, email, is_active
        FROM restaurants
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await
    .context("Failed to list restaurants")?;

    Ok(rows.iter().map(row_to_restaurant_postgres).collect())
}

async fn get_restaurant_for_user_postgres(
    pool: &PgPool,
    user_id: &str,
) -> Result<Option<Restaurant>> {
    let row = sqlx::query(
        r#"
        SELECT r.id, r.name, r.location, r.description, r.phone, r.email, r.is_active
        FROM restaurants r
        INNER JOIN users_restaurant ur ON ur.restaurant_id = r.id
        WHERE ur.user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .context("Failed to get restaurant for user")?;

    match row {
        Some(row) => Ok(Some(row_to_restaurant_postgres(&row))),
        None => Ok(None),
    }
}

async fn link_user_postgres(pool: &PgPool, user_id: &str, restaurant_id: &str) -> Result<()> {
    sqlx::query("INSERT INTO users_restaurant (id, restaurant_id, user_id) VALUES ($1, $2, $3)")
        .bind(Uuid::new_v4().to_string())
        .bind(restaurant_id)
        .bind(user_id)
        .execute(pool)
        .await
        .context("Failed to link user to restaurant")?;

    Ok(())
}

fn row_to_restaurant_postgres(row: &sqlx::postgres::PgRow) -> Restaurant {
    Restaurant {
        id: row.get("id"),
        name: row.get("name"),
        location: row.get("location"),
        description: row.get("description"),
        phone: row.get("phone"),
        email: row.get("email"),
        is_active: row.get("is_active"),
    }
}
