use axum::{
    routing::{post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/businesses/:business_id/bookings",
            post(handlers::bookings::create_booking),
        )
        .route(
            "/api/bookings/:id/reschedule",
            put(handlers::bookings::reschedule_booking),
        )
        .route(
            "/api/bookings/:id/cancel",
            post(handlers::bookings::cancel_booking),
        )
}
