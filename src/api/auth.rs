//! Authentication API endpoints
//!
//! Handles HTTP requests for user authentication:
//! - POST /api/signup - Guest account registration
//! - POST /api/login - Login and token issuance
//! - GET /api/user - Resolve the current user from a bearer token

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::models::{LoginInput, SignupInput};
use crate::services::auth::AuthServiceError;

/// POST /api/signup - Register a new account
///
/// Hashes the password before storage and fires the welcome mail in the
/// background; mail failures are logged, never surfaced.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupInput>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .auth_service
        .signup(body)
        .await
        .map_err(map_auth_error)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Signup successful",
            "user": user,
        })),
    ))
}

/// POST /api/login - Exchange credentials for a signed token
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginInput>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .auth_service
        .login(body)
        .await
        .map_err(map_auth_error)?;

    Ok(Json(serde_json::json!({
        "token": outcome.token,
        "user": outcome.user,
    })))
}

/// GET /api/user - Get the user behind the presented token
///
/// Requires authentication.
pub async fn get_current_user(user: AuthenticatedUser) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "user": user.0 }))
}

fn map_auth_error(e: AuthServiceError) -> ApiError {
    match e {
        AuthServiceError::ValidationError(msg) => ApiError::validation_error(msg),
        AuthServiceError::UserExists(msg) => ApiError::conflict(msg),
        AuthServiceError::AuthenticationError(msg) => ApiError::unauthorized(msg),
        AuthServiceError::NotFound(msg) => ApiError::not_found(msg),
        AuthServiceError::InternalError(_) => ApiError::internal_error(e.to_string()),
    }
}
