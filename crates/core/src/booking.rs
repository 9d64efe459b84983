//! Booking transaction orchestration.
//!
//! Create and reschedule never trust a slot list computed earlier in the
//! request lifecycle: open intervals and booked state are re-resolved and
//! [`compute_slots`] re-run at commit time. Even then, two concurrent
//! requests can both see the slot as free, so the final word belongs to the
//! repository's conditional write — an [`WriteOutcome::Overlap`] there is a
//! lost race, surfaced as `SLOT_NO_LONGER_AVAILABLE`.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use crate::clock::{self, Clock};
use crate::conflict::{check_conflicts, normalize_email};
use crate::errors::{BookingError, BookingResult};
use crate::models::appointment::{Appointment, AppointmentStatus};
use crate::models::availability::BusinessAvailability;
use crate::models::booking::{BookingOutcome, CreateBookingRequest};
use crate::models::business::Service;
use crate::repository::{AppointmentRepository, BusinessConfigRepository, WriteOutcome};
use crate::slots::{compute_slots, Slot};
use crate::time::{TimeInterval, TimeOfDay};

pub struct BookingService {
    appointments: Arc<dyn AppointmentRepository>,
    config: Arc<dyn BusinessConfigRepository>,
    clock: Arc<dyn Clock>,
}

impl BookingService {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        config: Arc<dyn BusinessConfigRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            appointments,
            config,
            clock,
        }
    }

    /// Candidate slots for a date and service.
    pub async fn available_slots(
        &self,
        business_id: Uuid,
        date: NaiveDate,
        service_id: Uuid,
    ) -> BookingResult<Vec<Slot>> {
        let service = self.active_service(business_id, service_id).await?;
        let availability = self.config.get_availability(business_id).await?;
        let (today, now_time) = self.local_now(&availability);

        let open = availability.open_intervals_for(date);
        let active = self
            .booked_after_sweep(business_id, date, today, now_time)
            .await?;
        let booked: Vec<TimeInterval> = active.iter().map(Appointment::interval).collect();

        Ok(compute_slots(
            date,
            service.duration_minutes,
            &open,
            &booked,
            today,
            now_time,
        ))
    }

    /// Books an appointment, re-validating availability at commit time.
    pub async fn create_booking(
        &self,
        business_id: Uuid,
        request: CreateBookingRequest,
    ) -> BookingResult<BookingOutcome> {
        let customer_email = normalize_email(&request.customer_email);
        if customer_email.is_empty() {
            return Err(BookingError::Validation(
                "customer email must not be empty".to_string(),
            ));
        }

        let service = self.active_service(business_id, request.service_id).await?;
        let availability = self.config.get_availability(business_id).await?;
        let (today, now_time) = self.local_now(&availability);

        let slot = self
            .require_open_slot(
                business_id,
                request.date,
                request.start_time,
                &service,
                &availability,
                None,
                today,
                now_time,
            )
            .await?;

        let policy = self.config.get_policy(business_id).await?;
        let owner_email = self.config.get_owner_email(business_id).await?;
        let existing = self
            .appointments
            .find_booked_for_customer(business_id, &customer_email, today)
            .await?;
        if let Some(conflict) = check_conflicts(
            request.date,
            service.id,
            &customer_email,
            &existing,
            &policy,
            &owner_email,
            today,
            now_time,
        ) {
            debug!(
                business_id = %business_id,
                code = ?conflict.code,
                "booking rejected by policy"
            );
            return Ok(BookingOutcome::Conflict(conflict));
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            business_id,
            customer_email,
            customer_name: request.customer_name,
            service_id: service.id,
            service_name: service.name,
            date: request.date,
            start_time: slot.start_time,
            end_time: slot.end_time,
            duration_minutes: service.duration_minutes,
            status: AppointmentStatus::Booked,
            cancelled_by: None,
            created_at: self.clock.now(),
            rescheduled_at: None,
        };

        match self.appointments.insert_if_no_overlap(appointment).await? {
            WriteOutcome::Committed(appointment) => {
                info!(
                    business_id = %business_id,
                    appointment_id = %appointment.id,
                    date = %appointment.date,
                    start = %appointment.start_time,
                    "appointment booked"
                );
                Ok(BookingOutcome::Booked(appointment))
            }
            WriteOutcome::Overlap => Err(BookingError::SlotUnavailable(format!(
                "{} {} was taken by a concurrent booking",
                request.date, request.start_time
            ))),
        }
    }

    /// Moves a BOOKED appointment to a new date and time, in place.
    pub async fn reschedule_booking(
        &self,
        appointment_id: Uuid,
        new_date: NaiveDate,
        new_start: TimeOfDay,
    ) -> BookingResult<Appointment> {
        let appointment = self.require_appointment(appointment_id).await?;
        if appointment.status != AppointmentStatus::Booked {
            return Err(BookingError::NotBooked(format!(
                "appointment {} has status {}",
                appointment_id,
                appointment.status.as_str()
            )));
        }

        let availability = self.config.get_availability(appointment.business_id).await?;
        let (today, now_time) = self.local_now(&availability);
        if new_date < today || (new_date == today && new_start <= now_time) {
            return Err(BookingError::PastDate(format!(
                "{new_date} {new_start} is not in the future"
            )));
        }

        let service = Service {
            id: appointment.service_id,
            business_id: appointment.business_id,
            name: appointment.service_name.clone(),
            duration_minutes: appointment.duration_minutes,
            is_active: true,
        };
        let slot = self
            .require_open_slot(
                appointment.business_id,
                new_date,
                new_start,
                &service,
                &availability,
                Some(appointment_id),
                today,
                now_time,
            )
            .await?;

        match self
            .appointments
            .reschedule_if_no_overlap(
                appointment_id,
                new_date,
                slot.start_time,
                slot.end_time,
                self.clock.now(),
            )
            .await?
        {
            WriteOutcome::Committed(appointment) => {
                info!(
                    appointment_id = %appointment.id,
                    date = %appointment.date,
                    start = %appointment.start_time,
                    "appointment rescheduled"
                );
                Ok(appointment)
            }
            WriteOutcome::Overlap => Err(BookingError::SlotUnavailable(format!(
                "{new_date} {new_start} was taken by a concurrent booking"
            ))),
        }
    }

    /// Cancels an appointment. Idempotent: cancelling an already-cancelled
    /// appointment succeeds and returns it unchanged.
    pub async fn cancel_booking(
        &self,
        appointment_id: Uuid,
        cancelled_by: &str,
    ) -> BookingResult<Appointment> {
        let appointment = self.require_appointment(appointment_id).await?;
        match appointment.status {
            AppointmentStatus::Cancelled => Ok(appointment),
            AppointmentStatus::Booked => {
                let cancelled = self
                    .appointments
                    .mark_cancelled(appointment_id, cancelled_by)
                    .await?;
                info!(appointment_id = %appointment_id, by = cancelled_by, "appointment cancelled");
                Ok(cancelled)
            }
            other => Err(BookingError::NotBooked(format!(
                "appointment {} has status {}",
                appointment_id,
                other.as_str()
            ))),
        }
    }

    fn local_now(&self, availability: &BusinessAvailability) -> (NaiveDate, TimeOfDay) {
        let now = self.clock.now();
        (
            clock::local_date(now, &availability.timezone),
            clock::local_time(now, &availability.timezone),
        )
    }

    async fn require_appointment(&self, id: Uuid) -> BookingResult<Appointment> {
        self.appointments
            .find_by_id(id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Appointment with ID {id} not found")))
    }

    async fn active_service(&self, business_id: Uuid, service_id: Uuid) -> BookingResult<Service> {
        self.config
            .find_service(business_id, service_id)
            .await?
            .filter(|service| service.is_active)
            .ok_or_else(|| {
                BookingError::NotFound(format!("Service with ID {service_id} not found"))
            })
    }

    /// Applies the lazy completion sweep to a date's bookings and returns
    /// the still-BOOKED remainder.
    async fn booked_after_sweep(
        &self,
        business_id: Uuid,
        date: NaiveDate,
        today: NaiveDate,
        now_time: TimeOfDay,
    ) -> BookingResult<Vec<Appointment>> {
        let appointments = self
            .appointments
            .find_booked_for_date(business_id, date)
            .await?;
        let (elapsed, active): (Vec<Appointment>, Vec<Appointment>) = appointments
            .into_iter()
            .partition(|appointment| appointment.has_elapsed(today, now_time));
        if !elapsed.is_empty() {
            let ids: Vec<Uuid> = elapsed.iter().map(|appointment| appointment.id).collect();
            debug!(business_id = %business_id, count = ids.len(), "sweeping elapsed appointments");
            self.appointments.mark_completed(&ids).await?;
        }
        Ok(active)
    }

    /// Recomputes the date's slots from fresh state and requires the
    /// requested start time to be among them. `exclude` drops the caller's
    /// own appointment from the busy set on reschedule.
    #[allow(clippy::too_many_arguments)]
    async fn require_open_slot(
        &self,
        business_id: Uuid,
        date: NaiveDate,
        start_time: TimeOfDay,
        service: &Service,
        availability: &BusinessAvailability,
        exclude: Option<Uuid>,
        today: NaiveDate,
        now_time: TimeOfDay,
    ) -> BookingResult<Slot> {
        let open = availability.open_intervals_for(date);
        let active = self
            .booked_after_sweep(business_id, date, today, now_time)
            .await?;
        let booked: Vec<TimeInterval> = active
            .iter()
            .filter(|appointment| Some(appointment.id) != exclude)
            .map(Appointment::interval)
            .collect();

        let slots = compute_slots(
            date,
            service.duration_minutes,
            &open,
            &booked,
            today,
            now_time,
        );
        slots
            .into_iter()
            .find(|slot| slot.start_time == start_time)
            .ok_or_else(|| {
                BookingError::SlotUnavailable(format!(
                    "{date} {start_time} is not an available slot"
                ))
            })
    }
}
