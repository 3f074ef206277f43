//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles CRUD operations for a specific entity.

pub mod booking;
pub mod restaurant;
pub mod session;
pub mod table;
pub mod time_slot;
pub mod user;

pub use booking::{BookingRepository, SqlxBookingRepository};
pub use restaurant::{RestaurantRepository, SqlxRestaurantRepository};
pub use session::{SessionRepository, SqlxSessionRepository};
pub use table::{SqlxTableRepository, TableRepository};
pub use time_slot::{SqlxTimeSlotRepository, TimeSlotRepository};
pub use user::{SqlxUserRepository, UserRepository};
