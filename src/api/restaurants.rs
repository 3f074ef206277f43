//! Restaurant API endpoints
//!
//! - GET /api/restaurants - List all restaurants
//! - GET /api/restaurants/{id} - Look up a restaurant by its owning user
//! - POST /api/restaurants - Reserved, not yet implemented

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::middleware::{ApiError, AppState};
use crate::models::{Restaurant, RestaurantSummary};

/// GET /api/restaurants - List all restaurants
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    let restaurants = state
        .restaurant_service
        .list()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(restaurants))
}

/// GET /api/restaurants/{id} - Restaurant owned by the given user
///
/// The path id is a user id; the restaurant is resolved through the
/// user-restaurant link, not looked up directly.
pub async fn get_restaurant_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<RestaurantSummary>, ApiError> {
    let summary = state
        .restaurant_service
        .get_summary_for_user(&user_id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Restaurant not found for this user"))?;

    Ok(Json(summary))
}

/// POST /api/restaurants - Placeholder, accepts the request and does nothing
pub async fn create_restaurant() -> StatusCode {
    StatusCode::OK
}
