//! # Slot Handlers
//!
//! Read side of the booking flow: a customer picks a date and service, and
//! this endpoint returns the valid start times for that day — the
//! business's open intervals for the date, packed by service duration,
//! minus already-booked intervals and already-passed times.
//!
//! The list is advisory only. The create-booking path recomputes it at
//! commit time, so a stale list can never produce a double booking.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use slotwise_core::models::booking::SlotsResponse;

use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters for the available-slots endpoint
#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    /// Business-local calendar date, `YYYY-MM-DD`
    pub date: NaiveDate,

    /// Service the customer wants to book
    pub service_id: Uuid,
}

/// Returns the bookable slots for a business, date, and service.
///
/// # Endpoint
///
/// ```text
/// GET /api/businesses/:business_id/slots?date=2026-09-01&service_id=...
/// ```
///
/// Past dates and closed days yield an empty list, not an error.
#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<ApiState>>,
    Path(business_id): Path<Uuid>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let slots = state
        .booking
        .available_slots(business_id, query.date, query.service_id)
        .await?;

    Ok(Json(SlotsResponse {
        date: query.date,
        slots,
    }))
}
