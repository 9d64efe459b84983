//! Repository ports the booking engine is injected with.
//!
//! The store, not the application, enforces the no-overlap invariant: the
//! insert/reschedule operations are single conditional writes that either
//! commit or report [`WriteOutcome::Overlap`]. Two requests can both pass
//! the application-level freshness check; only one can win the write.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::errors::BookingResult;
use crate::models::appointment::Appointment;
use crate::models::availability::BusinessAvailability;
use crate::models::business::{BookingPolicy, Service};
use crate::time::TimeOfDay;

/// Result of a store-enforced conditional write. `Overlap` is an expected
/// outcome (a concurrent writer holds part of the interval), not an error.
#[derive(Debug, Clone)]
pub enum WriteOutcome {
    Committed(Appointment),
    Overlap,
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> BookingResult<Option<Appointment>>;

    /// BOOKED appointments for a business on a date, ascending by start.
    async fn find_booked_for_date(
        &self,
        business_id: Uuid,
        date: NaiveDate,
    ) -> BookingResult<Vec<Appointment>>;

    /// BOOKED appointments of a customer with `date >= from_date`.
    /// The caller applies the strictly-in-the-future time cut.
    async fn find_booked_for_customer(
        &self,
        business_id: Uuid,
        customer_email: &str,
        from_date: NaiveDate,
    ) -> BookingResult<Vec<Appointment>>;

    /// Inserts the appointment only if no BOOKED appointment for the same
    /// business and date overlaps its interval.
    async fn insert_if_no_overlap(&self, appointment: Appointment) -> BookingResult<WriteOutcome>;

    /// Moves a BOOKED appointment to a new date/time only if no *other*
    /// BOOKED appointment overlaps the target interval. In-place mutation:
    /// the id and history are preserved.
    async fn reschedule_if_no_overlap(
        &self,
        id: Uuid,
        date: NaiveDate,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        rescheduled_at: DateTime<Utc>,
    ) -> BookingResult<WriteOutcome>;

    async fn mark_cancelled(&self, id: Uuid, cancelled_by: &str) -> BookingResult<Appointment>;

    /// Transitions the given BOOKED appointments to COMPLETED (lazy sweep).
    async fn mark_completed(&self, ids: &[Uuid]) -> BookingResult<()>;
}

#[async_trait]
pub trait BusinessConfigRepository: Send + Sync {
    async fn get_availability(&self, business_id: Uuid) -> BookingResult<BusinessAvailability>;

    async fn get_policy(&self, business_id: Uuid) -> BookingResult<BookingPolicy>;

    async fn get_owner_email(&self, business_id: Uuid) -> BookingResult<String>;

    async fn find_service(
        &self,
        business_id: Uuid,
        service_id: Uuid,
    ) -> BookingResult<Option<Service>>;
}
