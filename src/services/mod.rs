//! Services layer - Business logic
//!
//! This module contains all business logic services for the booking backend.
//! Services are responsible for:
//! - Implementing business rules
//! - Coordinating between repositories and the notification hub
//! - Handling validation and error cases

pub mod auth;
pub mod booking;
pub mod email;
pub mod password;
pub mod restaurant;
pub mod session;
pub mod table;
pub mod time_slot;
pub mod token;
pub mod user;

pub use auth::{AuthService, AuthServiceError, LoginOutcome};
pub use booking::{BookingService, BookingServiceError};
pub use email::EmailService;
pub use password::{hash_password, verify_password};
pub use restaurant::RestaurantService;
pub use session::{SessionService, SessionServiceError};
pub use table::TableService;
pub use time_slot::TimeSlotService;
pub use token::{decode_token, encode_token, Claims};
pub use user::UserService;
