//! Booking conflict policy.
//!
//! Conflicts are data, not errors: a rejected request carries the
//! conflicting appointments so the caller can offer a remedy (cancel the
//! old one and retry) instead of a dead-end failure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::appointment::{Appointment, AppointmentStatus};
use crate::models::business::BookingPolicy;
use crate::time::TimeOfDay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictCode {
    #[serde(rename = "ACTIVE_APPOINTMENT_EXISTS")]
    ActiveAppointmentExists,
    #[serde(rename = "SAME_SERVICE_SAME_DAY_EXISTS")]
    SameServiceSameDay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConflict {
    pub code: ConflictCode,
    pub existing_appointments: Vec<Appointment>,
}

/// Canonical form for customer identity comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Runs the customer-facing booking policies, in order:
///
/// 1. Owner exemption: the business owner booking through their own public
///    page is never blocked by their own customer rules.
/// 2. `ACTIVE_APPOINTMENT_EXISTS` when the one-upcoming-appointment policy
///    is on and the customer already holds a BOOKED appointment strictly in
///    the future (business-local comparison).
/// 3. `SAME_SERVICE_SAME_DAY_EXISTS` for a duplicate of the same service on
///    the same date, regardless of the policy flag — guards against
///    double-tap submissions.
pub fn check_conflicts(
    date: NaiveDate,
    service_id: Uuid,
    customer_email: &str,
    existing: &[Appointment],
    policy: &BookingPolicy,
    owner_email: &str,
    today: NaiveDate,
    now_time: TimeOfDay,
) -> Option<BookingConflict> {
    if normalize_email(customer_email) == normalize_email(owner_email) {
        return None;
    }

    let booked: Vec<&Appointment> = existing
        .iter()
        .filter(|appointment| appointment.status == AppointmentStatus::Booked)
        .collect();

    if policy.limit_to_one_upcoming {
        let upcoming: Vec<Appointment> = booked
            .iter()
            .filter(|appointment| appointment.is_upcoming(today, now_time))
            .map(|appointment| (*appointment).clone())
            .collect();
        if !upcoming.is_empty() {
            return Some(BookingConflict {
                code: ConflictCode::ActiveAppointmentExists,
                existing_appointments: upcoming,
            });
        }
    }

    let duplicates: Vec<Appointment> = booked
        .iter()
        .filter(|appointment| appointment.service_id == service_id && appointment.date == date)
        .map(|appointment| (*appointment).clone())
        .collect();
    if !duplicates.is_empty() {
        return Some(BookingConflict {
            code: ConflictCode::SameServiceSameDay,
            existing_appointments: duplicates,
        });
    }

    None
}
