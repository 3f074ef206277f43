//! Session API endpoints
//!
//! - GET /api/sessions - List sessions with time slot, bookings, restaurant
//! - POST /api/sessions - Create a session
//! - PUT /api/sessions/{id} - Update a session's scheduling fields
//! - DELETE /api/sessions/{id} - Delete a session

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState};
use crate::models::{CreateSessionInput, SessionDetails, UpdateSessionInput};
use crate::services::session::SessionServiceError;

/// Query parameters for the session listing
#[derive(Debug, Deserialize)]
pub struct ListSessionsQuery {
    pub restaurant_id: Option<String>,
}

/// GET /api/sessions - List sessions, optionally for one restaurant
pub async fn list_sessions(
    State(state): State<AppState>,
    Query(query): Query<ListSessionsQuery>,
) -> Result<Json<Vec<SessionDetails>>, ApiError> {
    let sessions = state
        .session_service
        .list_details(query.restaurant_id.as_deref())
        .await
        .map_err(map_session_error)?;

    Ok(Json(sessions))
}

/// POST /api/sessions - Create a session
pub async fn create_session(
    State(state): State<AppState>,
    Json(body): Json<CreateSessionInput>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .session_service
        .create(body)
        .await
        .map_err(map_session_error)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Session created successfully",
            "session": session,
        })),
    ))
}

/// PUT /api/sessions/{id} - Overwrite a session's scheduling fields
pub async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateSessionInput>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .session_service
        .update(&id, body)
        .await
        .map_err(map_session_error)?;

    Ok(Json(serde_json::json!({
        "message": "Session updated successfully",
        "session": session,
    })))
}

/// DELETE /api/sessions/{id} - Delete a session and its bookings
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .session_service
        .delete(&id)
        .await
        .map_err(map_session_error)?;

    Ok(Json(serde_json::json!({
        "message": "Session deleted successfully",
    })))
}

fn map_session_error(e: SessionServiceError) -> ApiError {
    match e {
        SessionServiceError::NotFound(msg) => ApiError::not_found(msg),
        SessionServiceError::InternalError(_) => ApiError::internal_error(e.to_string()),
    }
}
