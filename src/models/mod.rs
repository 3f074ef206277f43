//! Data models
//!
//! This module contains all data structures used throughout the booking
//! backend. Models represent:
//! - Database entities (Restaurant, TimeSlot, Table, User, Session, Booking)
//! - API request/response types
//! - Joined views returned by the listing endpoints

mod booking;
mod restaurant;
mod session;
mod table;
mod time_slot;
mod user;

pub use booking::{
    Booking, BookingWithRestaurant, CreateBookingInput, UpdateBookingInput, STATUS_CANCELLED,
    STATUS_CONFIRMED,
};
pub use restaurant::{Restaurant, RestaurantSummary};
pub use session::{
    CreateSessionInput, Session, SessionDetails, SessionWithTimeSlot, UpdateSessionInput,
};
pub use table::{CreateTableInput, Table, TableWithRestaurant};
pub use time_slot::TimeSlot;
pub use user::{CreateUserInput, LoginInput, SignupInput, User, UserRole};
