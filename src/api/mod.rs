//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints for the booking backend.
//! It includes:
//! - Auth API endpoints (signup, login, current user)
//! - Restaurant API endpoints
//! - Time slot API endpoints
//! - Table API endpoints
//! - User API endpoints
//! - Session API endpoints
//! - Booking API endpoints
//! - The WebSocket endpoint fed by the notification hub

pub mod auth;
pub mod bookings;
pub mod middleware;
pub mod restaurants;
pub mod sessions;
pub mod tables;
pub mod time_slots;
pub mod users;
pub mod ws;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use middleware::{ApiError, AppState, AuthenticatedUser};

/// GET / - Service banner
async fn root() -> Json<Value> {
    Json(json!({
        "service": "booking-backend",
        "message": "Restaurant booking API",
    }))
}

/// GET /health - Liveness probe with the current WebSocket connection count
async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let connections = state
        .hub
        .connection_count()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(json!({
        "status": "ok",
        "websocket_connections": connections,
    })))
}

/// Build the main API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Routes behind bearer-token auth
    let protected_routes = Router::new()
        .route("/user", get(auth::get_current_user))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_auth,
        ));

    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route(
            "/restaurants",
            get(restaurants::list_restaurants).post(restaurants::create_restaurant),
        )
        .route(
            "/restaurants/{id}",
            get(restaurants::get_restaurant_for_user),
        )
        .route(
            "/restaurants/{id}/tables",
            get(tables::list_restaurant_tables),
        )
        .route("/time-slots", get(time_slots::list_time_slots))
        .route("/tables", get(tables::list_tables).post(tables::create_table))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/sessions",
            get(sessions::list_sessions).post(sessions::create_session),
        )
        .route(
            "/sessions/{id}",
            put(sessions::update_session).delete(sessions::delete_session),
        )
        .route(
            "/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route(
            "/bookings/user/{email}",
            get(bookings::list_bookings_by_email),
        )
        .route("/bookings/{id}", put(bookings::update_booking))
        .route("/bookings/{email}/{id}", delete(bookings::cancel_booking))
        .merge(protected_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let cors = if cors_origin == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        CorsLayer::new()
            .allow_origin(cors_origin.parse::<HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true)
    };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api", build_api_router(state.clone()))
        .route("/ws", get(ws::ws_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
