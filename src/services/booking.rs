//! Booking service
//!
//! Booking lifecycle plus the seat accounting that goes with it. Seats are
//! taken from the session with a single conditional update when a booking
//! is created, and handed back when it is cancelled or deleted. Field
//! edits that are not a cancellation move no seats, even when they change
//! the guest count. Cancellation also pushes a notice through the
//! notification hub.

use crate::db::repositories::{BookingRepository, SessionRepository};
use crate::hub::NotificationHub;
use crate::models::{
    Booking, BookingWithRestaurant, CreateBookingInput, UpdateBookingInput, STATUS_CANCELLED,
};
use anyhow::Context;
use std::sync::Arc;

/// Errors that can occur in the booking service
#[derive(Debug, thiserror::Error)]
pub enum BookingServiceError {
    /// Invalid input data
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A referenced entity is missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request conflicts with current state
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Booking service for reservations and their seat accounting
pub struct BookingService {
    booking_repo: Arc<dyn BookingRepository>,
    session_repo: Arc<dyn SessionRepository>,
    hub: NotificationHub,
}

impl BookingService {
    /// Create a new booking service
    pub fn new(
        booking_repo: Arc<dyn BookingRepository>,
        session_repo: Arc<dyn SessionRepository>,
        hub: NotificationHub,
    ) -> Self {
        Self {
            booking_repo,
            session_repo,
            hub,
        }
    }

    /// List all bookings with the name of the restaurant they were made at
    pub async fn list_with_restaurant(
        &self,
    ) -> Result<Vec<BookingWithRestaurant>, BookingServiceError> {
        let bookings = self
            .booking_repo
            .list_with_restaurant()
            .await
            .context("Failed to list bookings")?;

        Ok(bookings)
    }

    /// List bookings made under a guest email
    pub async fn list_by_email(&self, email: &str) -> Result<Vec<Booking>, BookingServiceError> {
        let bookings = self
            .booking_repo
            .list_by_email(email)
            .await
            .context("Failed to list bookings")?;

        Ok(bookings)
    }

    /// Create a confirmed booking, taking its seats from the session.
    ///
    /// The seats are reserved with one conditional update, so two requests
    /// racing for the last seats can never both succeed.
    pub async fn create(&self, input: CreateBookingInput) -> Result<Booking, BookingServiceError> {
        if input.number_of_guests < 1 {
            return Err(BookingServiceError::ValidationError(
                "Number of guests must be at least 1".to_string(),
            ));
        }
        if let Some(phone) = input.phone.as_deref() {
            if !phone.is_empty() {
                validate_phone(phone)?;
            }
        }

        let session = self
            .session_repo
            .get_by_id(&input.session_id)
            .await
            .context("Failed to get session")?
            .ok_or_else(|| BookingServiceError::NotFound("Session not found".to_string()))?;

        let reserved = self
            .session_repo
            .reserve_slots(&session.id, input.number_of_guests)
            .await
            .context("Failed to reserve slots")?;
        if !reserved {
            return Err(BookingServiceError::ConflictError(
                "Not enough slots".to_string(),
            ));
        }

        let booking = Booking::new(
            input.session_id,
            input.name,
            input.email,
            input.phone.unwrap_or_default(),
            input.number_of_guests,
            input.notes,
        );

        match self.booking_repo.create(&booking).await {
            Ok(created) => Ok(created),
            Err(e) => {
                // Seats were already taken; hand them back before failing
                if let Err(restore_err) = self
                    .session_repo
                    .restore_slots(&booking.session_id, booking.number_of_guests)
                    .await
                {
                    tracing::warn!(
                        "Failed to restore slots for session {}: {}",
                        booking.session_id,
                        restore_err
                    );
                }
                Err(BookingServiceError::InternalError(
                    e.context("Failed to create booking"),
                ))
            }
        }
    }

    /// Apply a partial update to a booking.
    ///
    /// Only the transition into "cancelled" moves seats, and it restores
    /// the guest count as persisted by this same update.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateBookingInput,
    ) -> Result<Booking, BookingServiceError> {
        let mut booking = self
            .booking_repo
            .get_by_id(id)
            .await
            .context("Failed to get booking")?
            .ok_or_else(|| BookingServiceError::NotFound("Not found".to_string()))?;

        let was_cancelled = booking.is_cancelled();

        if let Some(user_name) = input.user_name {
            booking.user_name = user_name;
        }
        if let Some(user_email) = input.user_email {
            booking.user_email = user_email;
        }
        if let Some(user_phone) = input.user_phone {
            booking.user_phone = user_phone;
        }
        if let Some(number_of_guests) = input.number_of_guests {
            booking.number_of_guests = number_of_guests;
        }
        if let Some(status) = input.status {
            booking.status = status;
        }
        if let Some(notes) = input.notes {
            booking.notes = notes;
        }

        let updated = self
            .booking_repo
            .update(&booking)
            .await
            .context("Failed to update booking")?;

        if !was_cancelled && updated.is_cancelled() {
            if let Err(e) = self
                .session_repo
                .restore_slots(&updated.session_id, updated.number_of_guests)
                .await
            {
                tracing::warn!(
                    "Failed to restore slots for session {}: {}",
                    updated.session_id,
                    e
                );
            }
        }

        Ok(updated)
    }

    /// Cancel a booking on behalf of the guest who made it.
    ///
    /// The booking must belong to the given email and not already be
    /// cancelled. Seats go back to the session and every hub subscriber
    /// is notified; both are best-effort once the booking is cancelled.
    pub async fn cancel(&self, email: &str, id: &str) -> Result<Booking, BookingServiceError> {
        let mut booking = self
            .booking_repo
            .get_by_id_and_email(id, email)
            .await
            .context("Failed to get booking")?
            .ok_or_else(|| {
                BookingServiceError::NotFound("Booking not found for this email".to_string())
            })?;

        if booking.is_cancelled() {
            return Err(BookingServiceError::ConflictError(
                "Booking already cancelled".to_string(),
            ));
        }

        booking.status = STATUS_CANCELLED.to_string();
        let cancelled = self
            .booking_repo
            .update(&booking)
            .await
            .context("Failed to update booking")?;

        match self.session_repo.get_by_id(&cancelled.session_id).await {
            Ok(Some(session)) => {
                if let Err(e) = self
                    .session_repo
                    .restore_slots(&session.id, cancelled.number_of_guests)
                    .await
                {
                    tracing::warn!("Failed to restore slots for session {}: {}", session.id, e);
                }
                self.hub
                    .broadcast_session_cancelled(&session.name, &cancelled.user_name);
            }
            Ok(None) => {
                tracing::warn!(
                    "Session {} missing while cancelling booking {}",
                    cancelled.session_id,
                    cancelled.id
                );
            }
            Err(e) => {
                tracing::warn!("Failed to get session {}: {}", cancelled.session_id, e);
            }
        }

        Ok(cancelled)
    }

    /// Delete a booking, restoring its seats regardless of status.
    pub async fn delete(&self, id: &str) -> Result<(), BookingServiceError> {
        let booking = self
            .booking_repo
            .get_by_id(id)
            .await
            .context("Failed to get booking")?
            .ok_or_else(|| BookingServiceError::NotFound("Not found".to_string()))?;

        if let Err(e) = self
            .session_repo
            .restore_slots(&booking.session_id, booking.number_of_guests)
            .await
        {
            tracing::warn!(
                "Failed to restore slots for session {}: {}",
                booking.session_id,
                e
            );
        }

        self.booking_repo
            .delete(&booking.id)
            .await
            .context("Failed to delete booking")?;

        Ok(())
    }
}

/// Validate a guest phone number: digits only, exactly 10 of them, leading 0.
fn validate_phone(phone: &str) -> Result<(), BookingServiceError> {
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(BookingServiceError::ValidationError(
            "Phone number must contain digits only".to_string(),
        ));
    }
    if phone.len() != 10 || !phone.starts_with('0') {
        return Err(BookingServiceError::ValidationError(
            "Phone number must be 10 digits and start with 0".to_string(),
        ));
    }
    Ok(())
}
