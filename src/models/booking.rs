//! Booking model
//!
//! A booking is a guest's reservation against exactly one session. Status
//! is a free-form string; only the values "confirmed" and "cancelled" have
//! seat-accounting meaning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status assigned to newly created bookings.
pub const STATUS_CONFIRMED: &str = "confirmed";

/// The one status value with seat-accounting semantics: transitioning
/// into it (or deleting the booking) returns the guests to the session.
pub const STATUS_CANCELLED: &str = "cancelled";

/// Booking entity representing a reservation against a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier (UUID)
    pub id: String,
    /// Session this booking counts against
    pub session_id: String,
    /// Registered user id, if the guest was logged in
    pub user_id: Option<String>,
    /// Guest name
    #[serde(default)]
    pub user_name: String,
    /// Guest email
    #[serde(default)]
    pub user_email: String,
    /// Guest phone number
    #[serde(default)]
    pub user_phone: String,
    /// Date the booking was made, "YYYY-MM-DD"
    pub booking_date: String,
    /// Seats taken from the session
    pub number_of_guests: i64,
    /// Free-form status; "confirmed" on creation
    #[serde(default = "default_status")]
    pub status: String,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

fn default_status() -> String {
    STATUS_CONFIRMED.to_string()
}

impl Booking {
    /// Create a new confirmed Booking dated today.
    pub fn new(
        session_id: String,
        user_name: String,
        user_email: String,
        user_phone: String,
        number_of_guests: i64,
        notes: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            session_id,
            user_id: None,
            user_name,
            user_email,
            user_phone,
            booking_date: now.format("%Y-%m-%d").to_string(),
            number_of_guests,
            status: default_status(),
            notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the booking is cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.status == STATUS_CANCELLED
    }
}

/// Input for creating a booking.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingInput {
    /// Target session id
    pub session_id: String,
    /// Guest name
    #[serde(default)]
    pub name: String,
    /// Guest email
    #[serde(default)]
    pub email: String,
    /// Optional guest phone; validated when present and non-empty
    pub phone: Option<String>,
    /// Seats requested
    pub number_of_guests: i64,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
}

/// Input for the partial booking update endpoint.
///
/// Absent fields are left unchanged. Setting `status` to "cancelled" on a
/// not-yet-cancelled booking restores its guests to the session; no other
/// field change moves seats.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookingInput {
    /// New guest name
    pub user_name: Option<String>,
    /// New guest email
    pub user_email: Option<String>,
    /// New guest phone
    pub user_phone: Option<String>,
    /// New guest count (does not move seats)
    pub number_of_guests: Option<i64>,
    /// New status, free-form
    pub status: Option<String>,
    /// New notes
    pub notes: Option<String>,
}

/// Booking joined with the restaurant it was made at, as returned by the
/// booking listing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct BookingWithRestaurant {
    /// The booking itself
    #[serde(flatten)]
    pub booking: Booking,
    /// Name of the restaurant owning the booked session
    pub restaurant_name: String,
}
