//! Table model
//!
//! Physical tables inside a restaurant. Tables are reference data only;
//! bookings are made against sessions, not individual tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Restaurant;

/// A physical table belonging to a restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Unique identifier (UUID)
    pub id: String,
    /// Owning restaurant id
    pub restaurant_id: String,
    /// Table label, e.g. "A3" or "12"
    pub table_number: String,
    /// Number of seats
    pub capacity: i64,
    /// Table status; defaults to "active"
    #[serde(default = "default_status")]
    pub status: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

fn default_status() -> String {
    "active".to_string()
}

impl Table {
    /// Create a new Table with a generated id and "active" status.
    pub fn new(restaurant_id: String, table_number: String, capacity: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            restaurant_id,
            table_number,
            capacity,
            status: default_status(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a table.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTableInput {
    /// Owning restaurant id
    pub restaurant_id: String,
    /// Table label
    pub table_number: String,
    /// Number of seats
    pub capacity: i64,
    /// Optional status; "active" when omitted
    pub status: Option<String>,
}

/// Table joined with its owning restaurant, as returned by the table
/// listing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TableWithRestaurant {
    /// The table itself
    #[serde(flatten)]
    pub table: Table,
    /// The owning restaurant
    pub restaurant: Restaurant,
}
