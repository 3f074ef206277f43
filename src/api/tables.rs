//! Table API endpoints
//!
//! - GET /api/tables - List all tables with their restaurant
//! - GET /api/restaurants/{id}/tables - List one restaurant's tables
//! - POST /api/tables - Create a table

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::middleware::{ApiError, AppState};
use crate::models::{CreateTableInput, Table, TableWithRestaurant};

/// GET /api/tables - List all tables joined with their restaurant
pub async fn list_tables(
    State(state): State<AppState>,
) -> Result<Json<Vec<TableWithRestaurant>>, ApiError> {
    let tables = state
        .table_service
        .list_with_restaurant()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(tables))
}

/// GET /api/restaurants/{id}/tables - Tables belonging to one restaurant
pub async fn list_restaurant_tables(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
) -> Result<Json<Vec<Table>>, ApiError> {
    let tables = state
        .table_service
        .list_by_restaurant(&restaurant_id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(tables))
}

/// POST /api/tables - Create a table
pub async fn create_table(
    State(state): State<AppState>,
    Json(body): Json<CreateTableInput>,
) -> Result<(StatusCode, Json<Table>), ApiError> {
    let table = state
        .table_service
        .create(body)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(table)))
}
