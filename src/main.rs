//! Booking backend - A restaurant table-booking service

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booking_backend::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{
            SqlxBookingRepository, SqlxRestaurantRepository, SqlxSessionRepository,
            SqlxTableRepository, SqlxTimeSlotRepository, SqlxUserRepository,
        },
    },
    hub::NotificationHub,
    services::{
        AuthService, BookingService, EmailService, RestaurantService, SessionService,
        TableService, TimeSlotService, UserService,
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booking_backend=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting booking backend...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {:?}", config.database.driver);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Create repositories
    let user_repo = SqlxUserRepository::boxed(pool.clone());
    let restaurant_repo = SqlxRestaurantRepository::boxed(pool.clone());
    let time_slot_repo = SqlxTimeSlotRepository::boxed(pool.clone());
    let table_repo = SqlxTableRepository::boxed(pool.clone());
    let session_repo = SqlxSessionRepository::boxed(pool.clone());
    let booking_repo = SqlxBookingRepository::boxed(pool.clone());

    // Start the notification hub
    let hub = NotificationHub::start();
    tracing::info!("Notification hub started");

    // Initialize services
    let email_service = Arc::new(EmailService::new(config.email.clone()));
    let auth_service = Arc::new(AuthService::new(
        user_repo.clone(),
        email_service,
        config.auth.jwt_secret.clone(),
        config.auth.token_expiry_hours,
    ));
    let user_service = Arc::new(UserService::new(user_repo));
    let restaurant_service = Arc::new(RestaurantService::new(restaurant_repo.clone()));
    let time_slot_service = Arc::new(TimeSlotService::new(time_slot_repo.clone()));
    let table_service = Arc::new(TableService::new(table_repo));
    let session_service = Arc::new(SessionService::new(
        session_repo.clone(),
        restaurant_repo,
        time_slot_repo,
        booking_repo.clone(),
    ));
    let booking_service = Arc::new(BookingService::new(booking_repo, session_repo, hub.clone()));

    // Build application state
    let state = AppState {
        auth_service,
        user_service,
        restaurant_service,
        time_slot_service,
        table_service,
        session_service,
        booking_service,
        hub,
    };

    // Build router
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
