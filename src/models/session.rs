//! Session model
//!
//! A session is a bookable offering: one restaurant, one calendar date,
//! one time slot, and a fixed seating capacity that bookings draw down.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Booking, Restaurant, TimeSlot};

/// Session entity owning the seat capacity bookings are counted against.
///
/// `available_slots` starts at `max_guests` and is decremented by booking
/// creation and restored by cancellation/deletion. `is_available` tracks
/// whether any seats remain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier (UUID)
    pub id: String,
    /// Owning restaurant id
    pub restaurant_id: String,
    /// Calendar date, "YYYY-MM-DD"
    pub date: String,
    /// Time slot id within the date
    pub time_slot_id: String,
    /// Display name, e.g. "Friday Dinner"
    #[serde(default)]
    pub name: String,
    /// Total seating capacity
    pub max_guests: i64,
    /// Seats not yet taken by active bookings
    pub available_slots: i64,
    /// Whether any seats remain
    #[serde(default = "default_true")]
    pub is_available: bool,
    /// Creation timestamp (used for listing order)
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    #[serde(skip_serializing)]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Session {
    /// Create a new Session with all seats available.
    pub fn new(
        restaurant_id: String,
        date: String,
        time_slot_id: String,
        name: String,
        max_guests: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            restaurant_id,
            date,
            time_slot_id,
            name,
            max_guests,
            available_slots: max_guests,
            is_available: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionInput {
    /// Owning restaurant id
    pub restaurant_id: String,
    /// Time slot id
    pub time_slot_id: String,
    /// Display name
    pub name: String,
    /// Calendar date, "YYYY-MM-DD"
    pub date: String,
    /// Total seating capacity
    pub max_guests: i64,
}

/// Input for updating a session.
///
/// Overwrites scheduling fields only; `available_slots` and `is_available`
/// are never touched by updates.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSessionInput {
    /// New time slot id
    pub time_slot_id: String,
    /// New display name
    pub name: String,
    /// New calendar date
    pub date: String,
    /// New total capacity
    pub max_guests: i64,
}

/// Session joined with its time slot, as returned by the create and
/// update endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct SessionWithTimeSlot {
    /// The session itself
    #[serde(flatten)]
    pub session: Session,
    /// The associated time slot
    pub time_slot: TimeSlot,
}

/// Full session view for the listing endpoint: the session plus its time
/// slot, every booking made against it, and the owning restaurant.
#[derive(Debug, Clone, Serialize)]
pub struct SessionDetails {
    /// The session itself
    #[serde(flatten)]
    pub session: Session,
    /// The associated time slot
    pub time_slot: TimeSlot,
    /// All bookings against this session
    pub bookings: Vec<Booking>,
    /// The owning restaurant
    pub restaurant_data: Restaurant,
}
