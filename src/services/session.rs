//! Session service
//!
//! Sessions are the bookable units: a restaurant offering seats for a
//! date and time slot. Creation validates that the referenced restaurant
//! and time slot exist and opens the session at full capacity. Updates
//! touch scheduling fields only; seat counts are owned by the booking
//! flow.

use crate::db::repositories::{
    BookingRepository, RestaurantRepository, SessionRepository, TimeSlotRepository,
};
use crate::models::{
    CreateSessionInput, Session, SessionDetails, SessionWithTimeSlot, UpdateSessionInput,
};
use anyhow::{anyhow, Context, Result};
use std::sync::Arc;

/// Error types for session service operations
#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    /// A referenced entity is missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Session service for managing bookable sessions
pub struct SessionService {
    session_repo: Arc<dyn SessionRepository>,
    restaurant_repo: Arc<dyn RestaurantRepository>,
    time_slot_repo: Arc<dyn TimeSlotRepository>,
    booking_repo: Arc<dyn BookingRepository>,
}

impl SessionService {
    /// Create a new session service
    pub fn new(
        session_repo: Arc<dyn SessionRepository>,
        restaurant_repo: Arc<dyn RestaurantRepository>,
        time_slot_repo: Arc<dyn TimeSlotRepository>,
        booking_repo: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            session_repo,
            restaurant_repo,
            time_slot_repo,
            booking_repo,
        }
    }

    /// List sessions joined with their time slot, bookings, and restaurant,
    /// newest first, optionally filtered to one restaurant.
    pub async fn list_details(
        &self,
        restaurant_id: Option<&str>,
    ) -> Result<Vec<SessionDetails>, SessionServiceError> {
        let sessions = self
            .session_repo
            .list(restaurant_id)
            .await
            .context("Failed to list sessions")?;

        let mut details = Vec::with_capacity(sessions.len());
        for session in sessions {
            details.push(self.load_details(session).await?);
        }

        Ok(details)
    }

    /// Create a session at full capacity.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the restaurant or time slot does not exist
    /// - `InternalError` for database errors
    pub async fn create(
        &self,
        input: CreateSessionInput,
    ) -> Result<SessionWithTimeSlot, SessionServiceError> {
        let _restaurant = self
            .restaurant_repo
            .get_by_id(&input.restaurant_id)
            .await
            .context("Failed to get restaurant")?
            .ok_or_else(|| SessionServiceError::NotFound("Restaurant not found".to_string()))?;

        let time_slot = self
            .time_slot_repo
            .get_by_id(&input.time_slot_id)
            .await
            .context("Failed to get time slot")?
            .ok_or_else(|| SessionServiceError::NotFound("Time slot not found".to_string()))?;

        let session = Session::new(
            input.restaurant_id,
            input.date,
            input.time_slot_id,
            input.name,
            input.max_guests,
        );

        let created = self
            .session_repo
            .create(&session)
            .await
            .context("Failed to create session")?;

        Ok(SessionWithTimeSlot {
            session: created,
            time_slot,
        })
    }

    /// Overwrite a session's scheduling fields.
    ///
    /// Seat accounting state (`available_slots`, `is_available`) is left
    /// untouched even when `max_guests` changes.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateSessionInput,
    ) -> Result<Session, SessionServiceError> {
        let mut session = self
            .session_repo
            .get_by_id(id)
            .await
            .context("Failed to get session")?
            .ok_or_else(|| SessionServiceError::NotFound("Session not found".to_string()))?;

        session.time_slot_id = input.time_slot_id;
        session.name = input.name;
        session.date = input.date;
        session.max_guests = input.max_guests;

        let updated = self
            .session_repo
            .update(&session)
            .await
            .context("Failed to update session")?;

        Ok(updated)
    }

    /// Delete a session and, through the schema, its bookings.
    pub async fn delete(&self, id: &str) -> Result<(), SessionServiceError> {
        self.session_repo
            .get_by_id(id)
            .await
            .context("Failed to get session")?
            .ok_or_else(|| SessionServiceError::NotFound("Session not found".to_string()))?;

        self.session_repo
            .delete(id)
            .await
            .context("Failed to delete session")?;

        Ok(())
    }

    async fn load_details(&self, session: Session) -> Result<SessionDetails, SessionServiceError> {
        let time_slot = self
            .time_slot_repo
            .get_by_id(&session.time_slot_id)
            .await
            .context("Failed to get time slot")?
            .ok_or_else(|| anyhow!("Time slot missing for session {}", session.id))?;

        let restaurant_data = self
            .restaurant_repo
            .get_by_id(&session.restaurant_id)
            .await
            .context("Failed to get restaurant")?
            .ok_or_else(|| anyhow!("Restaurant missing for session {}", session.id))?;

        let bookings = self
            .booking_repo
            .list_by_session(&session.id)
            .await
            .context("Failed to list bookings")?;

        Ok(SessionDetails {
            session,
            time_slot,
            bookings,
            restaurant_data,
        })
    }
}
