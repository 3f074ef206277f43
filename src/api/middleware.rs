//! API middleware
//!
//! Contains middleware for:
//! - Authentication (bearer token validation)
//! - The shared application state handed to every handler
//! - The JSON error envelope returned by all endpoints

use axum::{
    extract::{Request, State},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::hub::NotificationHub;
use crate::models::User;
use crate::services::auth::AuthServiceError;
use crate::services::{
    AuthService, BookingService, RestaurantService, SessionService, TableService, TimeSlotService,
    UserService,
};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub restaurant_service: Arc<RestaurantService>,
    pub time_slot_service: Arc<TimeSlotService>,
    pub table_service: Arc<TableService>,
    pub session_service: Arc<SessionService>,
    pub booking_service: Arc<BookingService>,
    pub hub: NotificationHub,
}

/// Authenticated user extracted from request
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Duplicate names and exhausted capacity surface as 400, not 409
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            "CONFLICT" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

/// Authentication middleware
///
/// Resolves the Authorization header to a user and stores it in request
/// extensions for the `AuthenticatedUser` extractor. The raw header value
/// is used as the token unless it carries a "Bearer " prefix.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");
    if header.is_empty() {
        return Err(ApiError::unauthorized("Authorization header missing"));
    }

    let token = header.strip_prefix("Bearer ").unwrap_or(header);

    let user = state
        .auth_service
        .get_user_from_token(token)
        .await
        .map_err(|e| match e {
            AuthServiceError::AuthenticationError(msg) | AuthServiceError::NotFound(msg) => {
                ApiError::unauthorized(msg)
            }
            other => ApiError::internal_error(other.to_string()),
        })?;

    request.extensions_mut().insert(AuthenticatedUser(user));
    Ok(next.run(request).await)
}
