//! User administration API endpoints
//!
//! - GET /api/users - List all users
//! - POST /api/users - Create a user directly

use axum::{extract::State, http::StatusCode, Json};

use crate::api::middleware::{ApiError, AppState};
use crate::models::{CreateUserInput, User};

/// GET /api/users - List all users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .user_service
        .list()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(users))
}

/// POST /api/users - Create a user, defaulting role to "user" when omitted
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserInput>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state
        .user_service
        .create(body)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(user)))
}
