//! Booking API endpoints
//!
//! - GET /api/bookings - List all bookings with their restaurant name
//! - GET /api/bookings/user/{email} - List one guest's bookings
//! - POST /api/bookings - Create a booking
//! - PUT /api/bookings/{id} - Update a booking
//! - DELETE /api/bookings/{email}/{id} - Cancel a booking (not a hard delete)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::api::middleware::{ApiError, AppState};
use crate::models::{Booking, BookingWithRestaurant, CreateBookingInput, UpdateBookingInput};
use crate::services::booking::BookingServiceError;

/// GET /api/bookings - List all bookings joined with their restaurant
pub async fn list_bookings(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookingWithRestaurant>>, ApiError> {
    let bookings = state
        .booking_service
        .list_with_restaurant()
        .await
        .map_err(map_booking_error)?;

    Ok(Json(bookings))
}

/// GET /api/bookings/user/{email} - List a guest's bookings, newest first
pub async fn list_bookings_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let bookings = state
        .booking_service
        .list_by_email(&email)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(bookings))
}

/// POST /api/bookings - Create a booking against a session
pub async fn create_booking(
    State(state): State<AppState>,
    Json(body): Json<CreateBookingInput>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = state
        .booking_service
        .create(body)
        .await
        .map_err(map_booking_error)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": format!("{} booked successfully", booking.user_name),
            "booking": booking,
        })),
    ))
}

/// PUT /api/bookings/{id} - Apply a partial update to a booking
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateBookingInput>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = state
        .booking_service
        .update(&id, body)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(serde_json::json!({
        "message": "Booking updated",
        "booking": booking,
    })))
}

/// DELETE /api/bookings/{email}/{id} - Cancel the guest's booking
///
/// Cancels rather than deletes; the email must match the booking.
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path((email, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = state
        .booking_service
        .cancel(&email, &id)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(serde_json::json!({
        "message": "Sessions cancelled, seats available again",
        "booking": booking,
    })))
}

fn map_booking_error(e: BookingServiceError) -> ApiError {
    match e {
        BookingServiceError::ValidationError(msg) => ApiError::validation_error(msg),
        BookingServiceError::NotFound(msg) => ApiError::not_found(msg),
        BookingServiceError::ConflictError(msg) => ApiError::conflict(msg),
        BookingServiceError::InternalError(_) => ApiError::internal_error(e.to_string()),
    }
}
