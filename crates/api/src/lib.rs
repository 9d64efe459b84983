//! # Slotwise API
//!
//! HTTP surface for the appointment booking engine: slot lookup, booking
//! creation, reschedule, and cancellation.
//!
//! ## Architecture
//!
//! - **Routes**: endpoint and URL structure
//! - **Handlers**: request processing over [`BookingService`]
//! - **Middleware**: error mapping to HTTP responses
//! - **Config**: environment-driven settings
//!
//! Handlers never touch the database directly; all booking logic runs
//! through `slotwise-core`, with repositories injected at startup.

/// Configuration module for API settings
pub mod config;
/// Request handlers that call into the booking engine
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use slotwise_core::booking::BookingService;
use slotwise_core::clock::SystemClock;
use slotwise_db::repositories::appointment::PgAppointmentRepository;
use slotwise_db::repositories::business::PgBusinessConfigRepository;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers.
pub struct ApiState {
    pub booking: BookingService,
}

impl ApiState {
    /// Wires the booking engine to Postgres-backed repositories.
    pub fn with_pool(db_pool: PgPool) -> Self {
        Self {
            booking: BookingService::new(
                Arc::new(PgAppointmentRepository::new(db_pool.clone())),
                Arc::new(PgBusinessConfigRepository::new(db_pool)),
                Arc::new(SystemClock),
            ),
        }
    }
}

/// Builds the application router over the given state.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::slots::routes())
        .merge(routes::bookings::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and database pool.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::with_pool(db_pool));
    let app = router(state);

    // CORS only when origins are configured; same-origin deployments skip it
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect::<Vec<_>>();
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    let app = app.layer(tower_http::timeout::TimeoutLayer::new(
        std::time::Duration::from_secs(config.request_timeout),
    ));

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
