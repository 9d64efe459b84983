use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::conflict::BookingConflict;
use crate::models::appointment::Appointment;
use crate::slots::Slot;
use crate::time::TimeOfDay;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub service_id: Uuid,
    pub customer_email: String,
    pub customer_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleRequest {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelRequest {
    pub cancelled_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub date: NaiveDate,
    pub slots: Vec<Slot>,
}

/// Outcome of a create attempt. A policy conflict is an expected,
/// data-carrying result — the caller gets the conflicting appointments so
/// it can offer cancel-and-retry in the same flow.
#[derive(Debug, Clone)]
pub enum BookingOutcome {
    Booked(Appointment),
    Conflict(BookingConflict),
}
