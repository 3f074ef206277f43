//! Time slot API endpoints
//!
//! - GET /api/time-slots - List all time slots

use axum::{extract::State, Json};

use crate::api::middleware::{ApiError, AppState};
use crate::models::TimeSlot;

/// GET /api/time-slots - List all time slots, oldest first
pub async fn list_time_slots(
    State(state): State<AppState>,
) -> Result<Json<Vec<TimeSlot>>, ApiError> {
    let time_slots = state
        .time_slot_service
        .list()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(time_slots))
}
