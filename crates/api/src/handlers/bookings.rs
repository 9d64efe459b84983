//! # Booking Handlers
//!
//! Write side of the booking flow. Each operation re-validates against
//! current state inside the booking engine; handlers only translate
//! outcomes to HTTP:
//!
//! - a committed booking is 201;
//! - a policy conflict is 409 with the conflicting appointments in the
//!   body, so the UI can offer cancel-and-retry in the same flow;
//! - a lost race (`SLOT_NO_LONGER_AVAILABLE`) is 409 with an actionable
//!   code — the client should re-fetch slots and resubmit.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use slotwise_core::models::appointment::Appointment;
use slotwise_core::models::booking::{
    BookingOutcome, CancelRequest, CreateBookingRequest, RescheduleRequest,
};

use crate::{middleware::error_handling::AppError, ApiState};

/// Books an appointment.
///
/// # Endpoint
///
/// ```text
/// POST /api/businesses/:business_id/bookings
/// ```
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Path(business_id): Path<Uuid>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Response, AppError> {
    match state.booking.create_booking(business_id, payload).await? {
        BookingOutcome::Booked(appointment) => {
            Ok((StatusCode::CREATED, Json(appointment)).into_response())
        }
        BookingOutcome::Conflict(conflict) => {
            Ok((StatusCode::CONFLICT, Json(conflict)).into_response())
        }
    }
}

/// Moves a booked appointment to a new date/time. The appointment id and
/// history are preserved; this is a mutation, not cancel-and-recreate.
///
/// # Endpoint
///
/// ```text
/// PUT /api/bookings/:id/reschedule
/// ```
#[axum::debug_handler]
pub async fn reschedule_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RescheduleRequest>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = state
        .booking
        .reschedule_booking(id, payload.date, payload.start_time)
        .await?;

    Ok(Json(appointment))
}

/// Cancels a booked appointment. Idempotent: repeating the call against an
/// already-cancelled appointment returns success.
///
/// # Endpoint
///
/// ```text
/// POST /api/bookings/:id/cancel
/// ```
#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CancelRequest>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = state
        .booking
        .cancel_booking(id, &payload.cancelled_by)
        .await?;

    Ok(Json(appointment))
}
