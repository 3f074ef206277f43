//! Booking repository
//!
//! Database operations for bookings. Seat accounting lives in the session
//! repository; this module only reads and writes booking rows.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{Booking, BookingWithRestaurant};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row, SqlitePool};
use std::sync::Arc;

/// Booking repository trait
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Create a new booking
    async fn create(&self, booking: &Booking) -> Result<Booking>;

    /// Get booking by ID
    async fn get_by_id(&self, id: &str) -> Result<Option<Booking>>;

    /// Get booking by ID, only if it belongs to the given guest email
    async fn get_by_id_and_email(&self, id: &str, email: &str) -> Result<Option<Booking>>;

    /// List all bookings joined with their restaurant name, newest first
    async fn list_with_restaurant(&self) -> Result<Vec<BookingWithRestaurant>>;

    /// List bookings made under a guest email, newest first
    async fn list_by_email(&self, email: &str) -> Result<Vec<Booking>>;

    /// List bookings against one session, newest first
    async fn list_by_session(&self, session_id: &str) -> Result<Vec<Booking>>;

    /// Overwrite the mutable fields of a booking
    async fn update(&self, booking: &Booking) -> Result<Booking>;

    /// Delete a booking
    async fn delete(&self, id: &str) -> Result<()>;
}

/// SQLx-based booking repository implementation
pub struct SqlxBookingRepository {
    pool: DynDatabasePool,
}

impl SqlxBookingRepository {
    /// Create a new SQLx booking repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn BookingRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl BookingRepository for SqlxBookingRepository {
    async fn create(&self, booking: &Booking) -> Result<Booking> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                create_booking_sqlite(self.pool.as_sqlite().unwrap(), booking).await
            }
            DatabaseDriver::Postgres => {
                create_booking_postgres(self.pool.as_postgres().unwrap(), booking).await
            }
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Booking>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_booking_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await
            }
            DatabaseDriver::Postgres => {
                get_booking_by_id_postgres(self.pool.as_postgres().unwrap(), id).await
            }
        }
    }

    async fn get_by_id_and_email(&self, id: &str, email: &str) -> Result<Option<Booking>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_booking_by_id_and_email_sqlite(self.pool.as_sqlite().unwrap(), id, email).await
            }
            DatabaseDriver::Postgres => {
                get_booking_by_id_and_email_postgres(self.pool.as_postgres().unwrap(), id, email)
                    .await
            }
        }
    }

    async fn list_with_restaurant(&self) -> Result<Vec<BookingWithRestaurant>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_bookings_with_restaurant_sqlite(self.pool.as_sqlite().unwrap()).await
            }
            DatabaseDriver::Postgres => {
                list_bookings_with_restaurant_postgres(self.pool.as_postgres().unwrap()).await
            }
        }
    }

    async fn list_by_email(&self, email: &str) -> Result<Vec<Booking>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_bookings_by_email_sqlite(self.pool.as_sqlite().unwrap(), email).await
            }
            DatabaseDriver::Postgres => {
                list_bookings_by_email_postgres(self.pool.as_postgres().unwrap(), email).await
            }
        }
    }

    async fn list_by_session(&self, session_id: &str) -> Result<Vec<Booking>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_bookings_by_session_sqlite(self.pool.as_sqlite().unwrap(), session_id).await
            }
            DatabaseDriver::Postgres => {
                list_bookings_by_session_postgres(self.pool.as_postgres().unwrap(), session_id).await
            }
        }
    }

    async fn update(&self, booking: &Booking) -> Result<Booking> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                update_booking_sqlite(self.pool.as_sqlite().unwrap(), booking).await
            }
            DatabaseDriver::Postgres => {
                update_booking_postgres(self.pool.as_postgres().unwrap(), booking).await
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => delete_booking_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Postgres => {
                delete_booking_postgres(self.pool.as_postgres().unwrap(), id).await
            }
        }
    }
}

const BOOKING_COLUMNS: &str = "id, session_id, user_id, user_name, user_email, user_phone, booking_date, number_of_guests, status, notes, created_at, updated_at";

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_booking_sqlite(pool: &SqlitePool, booking: &Booking) -> Result<Booking> {
    sqlx::query(&format!(
        r#"
        INSERT INTO bookings ({BOOKING_COLUMNS})
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#
    ))
    .bind(&booking.id)
    .bind(&booking.session_id)
    .bind(&booking.user_id)
    .bind(&booking.user_name)
    .bind(&booking.user_email)
    .bind(&booking.user_phone)
    .bind(&booking.booking_date)
    .bind(booking.number_of_guests)
    .bind(&booking.status)
    .bind(&booking.notes)
    .bind(booking.created_at)
    .bind(booking.updated_at)
    .execute(pool)
    .await
    .context("Failed to create booking")?;

    Ok(booking.clone())
}

async fn get_booking_by_id_sqlite(pool: &SqlitePool, id: &str) -> Result<Option<Booking>> {
    let row = sqlx::query(&format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get booking by ID")?;

    Ok(row.map(|row| row_to_booking_sqlite(&row)))
}

async fn get_booking_by_id_and_email_sqlite(
    pool: &SqlitePool,
    id: &str,
    email: &str,
) -> Result<Option<Booking>> {
    let row = sqlx::query(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ? AND user_email = ?"
    ))
    .bind(id)
    .bind(email)
    .fetch_optional(pool)
    .await
    .context("Failed to get booking by ID and email")?;

    Ok(row.map(|row| row_to_booking_sqlite(&row)))
}

async fn list_bookings_with_restaurant_sqlite(
    pool: &SqlitePool,
) -> Result<Vec<BookingWithRestaurant>> {
    let rows = sqlx::query(
        r#"
        SELECT b.id, b.session_id, b.user_id, b.user_name, b.user_email, b.user_phone,
               b.booking_date, b.number_of_guests, b.status, b.notes, b.created_at, b.updated_at,
               r.name as restaurant_name
        FROM bookings b
        INNER JOIN sessions s ON s.id = b.session_id
        INNER JOIN restaurants r ON r.id = s.restaurant_id
        ORDER BY b.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
    .context("Failed to list bookings")?;

    Ok(rows
        .iter()
        .map(|row| BookingWithRestaurant {
            booking: row_to_booking_sqlite(row),
            restaurant_name: row.get("restaurant_name"),
        })
        .collect())
}

async fn list_bookings_by_email_sqlite(pool: &SqlitePool, email: &str) -> Result<Vec<Booking>> {
    let rows = sqlx::query(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE user_email = ? ORDER BY created_at DESC"
    ))
    .bind(email)
    .fetch_all(pool)
    .await
    .context("Failed to list bookings by email")?;

    Ok(rows.iter().map(row_to_booking_sqlite).collect())
}

async fn list_bookings_by_session_sqlite(
    pool: &SqlitePool,
    session_id: &str,
) -> Result<Vec<Booking>> {
    let rows = sqlx::query(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE session_id = ? ORDER BY created_at DESC"
    ))
    .bind(session_id)
    .fetch_all(pool)
    .await
    .context("Failed to list bookings by session")?;

    Ok(rows.iter().map(row_to_booking_sqlite).collect())
}

async fn update_booking_sqlite(pool: &SqlitePool, booking: &Booking) -> Result<Booking> {
    let now = Utc::now();

    sqlx::query(
        r#"
        UPDATE bookings
        SET user_name = ?, user_email = ?, user_phone = ?, number_of_guests = ?,
            status = ?, notes = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&booking.user_name)
    .bind(&booking.user_email)
    .bind(&booking.user_phone)
    .bind(booking.number_of_guests)
    .bind(&booking.status)
    .bind(&booking.notes)
    .bind(now)
    .bind(&booking.id)
    .execute(pool)
    .await
    .context("Failed to update booking")?;

    get_booking_by_id_sqlite(pool, &booking.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Booking not found after update"))
}

async fn delete_booking_sqlite(pool: &SqlitePool, id: &str) -> Result<()> {
    sqlx::query("DELETE FROM bookings WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete booking")?;

    Ok(())
}

fn row_to_booking_sqlite(row: &sqlx::sqlite::SqliteRow) -> Booking {
    Booking {
        id: row.get("id"),
        session_id: row.get("session_id"),
        user_id: row.get("user_id"),
        user_name: row.get("user_name"),
        user_email: row.get("user_email"),
        user_phone: row.get("user_phone"),
        booking_date: row.get("booking_date"),
        number_of_guests: row.get("number_of_guests"),
        status: row.get("status"),
        notes: row.get("notes"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

// ============================================================================
// PostgreSQL implementations
// ============================================================================

async fn create_booking_postgres(pool: &PgPool, booking: &Booking) -> Result<Booking> {
    sqlx::query(&format!(
        r#"
        INSERT INTO bookings ({BOOKING_COLUMNS})
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#
    ))
    .bind(&booking.id)
    .bind(&booking.session_id)
    .bind(&booking.user_id)
    .bind(&booking.user_name)
    .bind(&booking.user_email)
    .bind(&booking.user_phone)
    .bind(&booking.booking_date)
    .bind(booking.number_of_guests)
    .bind(&booking.status)
    .bind(&booking.notes)
    .bind(booking.created_at)
    .bind(booking.updated_at)
    .execute(pool)
    .await
    .context("Failed to create booking")?;

    Ok(booking.clone())
}

async fn get_booking_by_id_postgres(pool: &PgPool, id: &str) -> Result<Option<Booking>> {
    let row = sqlx::query(&format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get booking by ID")?;

    Ok(row.map(|row| row_to_booking_postgres(&row)))
}

async fn get_booking_by_id_and_email_postgres(
    pool: &PgPool,
    id: &str,
    email: &str,
) -> Result<Option<Booking>> {
    let row = sqlx::query(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1 AND user_email = $2"
    ))
    .bind(id)
    .bind(email)
    .fetch_optional(pool)
    .await
    .context("Failed to get booking by ID and email")?;

    Ok(row.map(|row| row_to_booking_postgres(&row)))
}

async fn list_bookings_with_restaurant_postgres(
    pool: &PgPool,
) -> Result<Vec<BookingWithRestaurant>> {
    let rows = sqlx::query(
        r#"
        SELECT b.id, b.session_id, b.user_id, b.user_name, b.user_email, b.user_phone,
               b.booking_date, b.number_of_guests, b.status, b.notes, b.created_at, b.updated_at,
               r.name as restaurant_name
        FROM bookings b
        INNER JOIN sessions s ON s.id = b.session_id
        INNER JOIN restaurants r ON r.id = s.restaurant_id
        ORDER BY b.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
    .context("Failed to list bookings")?;

    Ok(rows
        .iter()
        .map(|row| BookingWithRestaurant {
            booking: row_to_booking_postgres(row),
            restaurant_name: row.get("restaurant_name"),
        })
        .collect())
}

async fn list_bookings_by_email_postgres(pool: &PgPool, email: &str) -> Result<Vec<Booking>> {
    let rows = sqlx::query(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE user_email = $1 ORDER BY created_at DESC"
    ))
    .bind(email)
    .fetch_all(pool)
    .await
    .context("Failed to list bookings by email")?;

    Ok(rows.iter().map(row_to_booking_postgres).collect())
}

async fn list_bookings_by_session_postgres(
    pool: &PgPool,
    session_id: &str,
) -> Result<Vec<Booking>> {
    let rows = sqlx::query(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE session_id = $1 ORDER BY created_at DESC"
    ))
    .bind(session_id)
    .fetch_all(pool)
    .await
    .context("Failed to list bookings by session")?;

    Ok(rows.iter().map(row_to_booking_postgres).collect())
}

async fn update_booking_postgres(pool: &PgPool, booking: &Booking) -> Result<Booking> {
    let now = Utc::now();

    sqlx::query(
        r#"
        UPDATE bookings
        SET user_name = $1, user_email = $2, user_phone = $3, number_of_guests = $4,
            status = $5, notes = $6, updated_at = $7
        WHERE id = $8
        "#,
    )
    .bind(&booking.user_name)
    .bind(&booking.user_email)
    .bind(&booking.user_phone)
    .bind(booking.number_of_guests)
    .bind(&booking.status)
    .bind(&booking.notes)
    .bind(now)
    .bind(&booking.id)
    .execute(pool)
    .await
    .context("Failed to update booking")?;

    get_booking_by_id_postgres(pool, &booking.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Booking not found after update"))
}

async fn delete_booking_postgres(pool: &PgPool, id: &str) -> Result<()> {
    sqlx::query("DELETE FROM bookings WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete booking")?;

    Ok(())
}

fn row_to_booking_postgres(row: &sqlx::postgres::PgRow) -> Booking {
    Booking {
        id: row.get("id"),
        session_id: row.get("session_id"),
        user_id: row.get("user_id"),
        user_name: row.get("user_name"),
        user_email: row.get("user_email"),
        user_phone: row.get("user_phone"),
        booking_date: row.get("booking_date"),
        number_of_guests: row.get("number_of_guests"),
        status: row.get("status"),
        notes: row.get("notes"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::restaurant::{RestaurantRepository, SqlxRestaurantRepository};
    use crate::db::repositories::session::{SessionRepository, SqlxSessionRepository};
    use crate::db::repositories::time_slot::{SqlxTimeSlotRepository, TimeSlotRepository};
    use crate::db::{create_test_pool, migrations};
    use crate::models::{Restaurant, Session, TimeSlot, STATUS_CANCELLED};

    struct Fixture {
        repo: SqlxBookingRepository,
        sessions: SqlxSessionRepository,
        session: Session,
    }

    async fn setup() -> Fixture {
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

        let sessions = SqlxSessionRepository::new(pool.clone());
        let session = sessions
            .create(&Session::new(
                restaurant.id.clone(),
                "2026-01-15".to_string(),
                slot.id.clone(),
                "Friday Dinner".to_string(),
                20,
            ))
            .await
            .expect("Failed to create session");

        Fixture {
            repo: SqlxBookingRepository::new(pool),
            sessions,
            session,
        }
    }

    fn test_booking(session_id: &str, email: &str, guests: i64) -> Booking {
        Booking::new(
            session_id.to_string(),
            "alice".to_string(),
            email.to_string(),
            "0812345678".to_string(),
            guests,
            String::new(),
        )
    }

    #[tokio::test]
    async fn test_create_and_get_booking() {
        let fixture = setup().await;
        let booking = test_booking(&fixture.session.id, "alice@example.com", 4);

        let created = fixture
            .repo
            .create(&booking)
            .await
            .expect("Failed to create booking");
        let found = fixture
            .repo
            .get_by_id(&created.id)
            .await
            .expect("Failed to get booking")
            .expect("Booking not found");

        assert_eq!(found.user_email, "alice@example.com");
        assert_eq!(found.number_of_guests, 4);
        assert_eq!(found.status, "confirmed");
        assert!(found.user_id.is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_and_email_requires_match() {
        let fixture = setup().await;
        let created = fixture
            .repo
            .create(&test_booking(&fixture.session.id, "alice@example.com", 2))
            .await
            .expect("Failed to create booking");

        let found = fixture
            .repo
            .get_by_id_and_email(&created.id, "alice@example.com")
            .await
            .expect("Failed to get booking");
        assert!(found.is_some());

        let mismatched = fixture
            .repo
            .get_by_id_and_email(&created.id, "other@example.com")
            .await
            .expect("Failed to get booking");
        assert!(mismatched.is_none());
    }

    #[tokio::test]
    async fn test_list_with_restaurant_newest_first() {
        let fixture = setup().await;

        let mut first = test_booking(&fixture.session.id, "a@example.com", 2);
        first.created_at = Utc::now() - chrono::Duration::seconds(10);
        let second = test_booking(&fixture.session.id, "b@example.com", 2);

        fixture.repo.create(&first).await.expect("Failed to create booking");
        fixture.repo.create(&second).await.expect("Failed to create booking");

        let listed = fixture
            .repo
            .list_with_restaurant()
            .await
            .expect("Failed to list bookings");

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].booking.user_email, "b@example.com");
        assert_eq!(listed[0].restaurant_name, "Cafe");
        assert_eq!(listed[1].booking.user_email, "a@example.com");
    }

    #[tokio::test]
    async fn test_list_by_email() {
        let fixture = setup().await;

        fixture
            .repo
            .create(&test_booking(&fixture.session.id, "mine@example.com", 2))
            .await
            .expect("Failed to create booking");
        fixture
            .repo
            .create(&test_booking(&fixture.session.id, "other@example.com", 2))
            .await
            .expect("Failed to create booking");

        let listed = fixture
            .repo
            .list_by_email("mine@example.com")
            .await
            .expect("Failed to list bookings");

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].user_email, "mine@example.com");

        let none = fixture
            .repo
            .list_by_email("nobody@example.com")
            .await
            .expect("Failed to list bookings");
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_list_by_session() {
        let fixture = setup().await;

        fixture
            .repo
            .create(&test_booking(&fixture.session.id, "a@example.com", 2))
            .await
            .expect("Failed to create booking");

        let listed = fixture
            .repo
            .list_by_session(&fixture.session.id)
            .await
            .expect("Failed to list bookings");
        assert_eq!(listed.len(), 1);

        let none = fixture
            .repo
            .list_by_session("missing")
            .await
            .expect("Failed to list bookings");
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_update_booking() {
        let fixture = setup().await;
        let created = fixture
            .repo
            .create(&test_booking(&fixture.session.id, "alice@example.com", 2))
            .await
            .expect("Failed to create booking");

        let mut changed = created.clone();
        changed.status = STATUS_CANCELLED.to_string();
        changed.notes = "window seat".to_string();

        let updated = fixture
            .repo
            .update(&changed)
            .await
            .expect("Failed to update booking");

        assert_eq!(updated.status, STATUS_CANCELLED);
        assert_eq!(updated.notes, "window seat");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_delete_booking() {
        let fixture = setup().await;
        let created = fixture
            .repo
            .create(&test_booking(&fixture.session.id, "alice@example.com", 2))
            .await
            .expect("Failed to create booking");

        fixture
            .repo
            .delete(&created.id)
            .await
            .expect("Failed to delete booking");

        let found = fixture
            .repo
            .get_by_id(&created.id)
            .await
            .expect("Failed to get booking");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_deleting_session_cascades_to_bookings() {
        let fixture = setup().await;
        let created = fixture
            .repo
            .create(&test_booking(&fixture.session.id, "alice@example.com", 2))
            .await
            .expect("Failed to create booking");

        fixture
            .sessions
            .delete(&fixture.session.id)
            .await
            .expect("Failed to delete session");

        let found = fixture
            .repo
            .get_by_id(&created.id)
            .await
            .expect("Failed to get booking");
        assert!(found.is_none());
    }
}
