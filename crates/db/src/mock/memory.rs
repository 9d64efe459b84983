//! In-memory repository implementations for tests.
//!
//! `InMemoryAppointmentRepo` mirrors the Postgres exclusion constraint: the
//! overlap check and the write happen under one lock, so concurrent create
//! and reschedule attempts race exactly as they do against the real store —
//! one writer commits, the other sees `WriteOutcome::Overlap`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use slotwise_core::errors::{BookingError, BookingResult};
use slotwise_core::models::appointment::{Appointment, AppointmentStatus};
use slotwise_core::models::availability::BusinessAvailability;
use slotwise_core::models::business::{BookingPolicy, Service};
use slotwise_core::repository::{
    AppointmentRepository, BusinessConfigRepository, WriteOutcome,
};
use slotwise_core::time::{TimeInterval, TimeOfDay};

#[derive(Default)]
pub struct InMemoryAppointmentRepo {
    appointments: Mutex<Vec<Appointment>>,
}

impl InMemoryAppointmentRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an appointment without the overlap guard.
    pub fn seed(&self, appointment: Appointment) {
        self.appointments.lock().unwrap().push(appointment);
    }

    pub fn get(&self, id: Uuid) -> Option<Appointment> {
        self.appointments
            .lock()
            .unwrap()
            .iter()
            .find(|appointment| appointment.id == id)
            .cloned()
    }

    pub fn all(&self) -> Vec<Appointment> {
        self.appointments.lock().unwrap().clone()
    }

    fn overlaps_booked(
        appointments: &[Appointment],
        business_id: Uuid,
        date: NaiveDate,
        interval: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> bool {
        appointments.iter().any(|existing| {
            existing.business_id == business_id
                && existing.date == date
                && existing.status == AppointmentStatus::Booked
                && Some(existing.id) != exclude
                && existing.interval().overlaps(interval)
        })
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepo {
    async fn find_by_id(&self, id: Uuid) -> BookingResult<Option<Appointment>> {
        Ok(self.get(id))
    }

    async fn find_booked_for_date(
        &self,
        business_id: Uuid,
        date: NaiveDate,
    ) -> BookingResult<Vec<Appointment>> {
        let mut found: Vec<Appointment> = self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|appointment| {
                appointment.business_id == business_id
                    && appointment.date == date
                    && appointment.status == AppointmentStatus::Booked
            })
            .cloned()
            .collect();
        found.sort_by_key(|appointment| appointment.start_time);
        Ok(found)
    }

    async fn find_booked_for_customer(
        &self,
        business_id: Uuid,
        customer_email: &str,
        from_date: NaiveDate,
    ) -> BookingResult<Vec<Appointment>> {
        let mut found: Vec<Appointment> = self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|appointment| {
                appointment.business_id == business_id
                    && appointment.customer_email == customer_email
                    && appointment.status == AppointmentStatus::Booked
                    && appointment.date >= from_date
            })
            .cloned()
            .collect();
        found.sort_by_key(|appointment| (appointment.date, appointment.start_time));
        Ok(found)
    }

    async fn insert_if_no_overlap(&self, appointment: Appointment) -> BookingResult<WriteOutcome> {
        let mut appointments = self.appointments.lock().unwrap();
        if Self::overlaps_booked(
            &appointments,
            appointment.business_id,
            appointment.date,
            &appointment.interval(),
            None,
        ) {
            return Ok(WriteOutcome::Overlap);
        }
        appointments.push(appointment.clone());
        Ok(WriteOutcome::Committed(appointment))
    }

    async fn reschedule_if_no_overlap(
        &self,
        id: Uuid,
        date: NaiveDate,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        rescheduled_at: DateTime<Utc>,
    ) -> BookingResult<WriteOutcome> {
        let mut appointments = self.appointments.lock().unwrap();

        let interval = TimeInterval {
            start: start_time,
            end: end_time,
        };
        let business_id = appointments
            .iter()
            .find(|appointment| appointment.id == id)
            .map(|appointment| appointment.business_id)
            .ok_or_else(|| BookingError::NotFound(format!("Appointment with ID {id} not found")))?;
        if Self::overlaps_booked(&appointments, business_id, date, &interval, Some(id)) {
            return Ok(WriteOutcome::Overlap);
        }

        let appointment = appointments
            .iter_mut()
            .find(|appointment| {
                appointment.id == id && appointment.status == AppointmentStatus::Booked
            })
            .ok_or_else(|| {
                BookingError::NotBooked(format!("appointment {id} is not in BOOKED status"))
            })?;
        appointment.date = date;
        appointment.start_time = start_time;
        appointment.end_time = end_time;
        appointment.rescheduled_at = Some(rescheduled_at);
        Ok(WriteOutcome::Committed(appointment.clone()))
    }

    async fn mark_cancelled(&self, id: Uuid, cancelled_by: &str) -> BookingResult<Appointment> {
        let mut appointments = self.appointments.lock().unwrap();
        let appointment = appointments
            .iter_mut()
            .find(|appointment| appointment.id == id)
            .ok_or_else(|| BookingError::NotFound(format!("Appointment with ID {id} not found")))?;
        appointment.status = AppointmentStatus::Cancelled;
        appointment.cancelled_by = Some(cancelled_by.to_string());
        Ok(appointment.clone())
    }

    async fn mark_completed(&self, ids: &[Uuid]) -> BookingResult<()> {
        let mut appointments = self.appointments.lock().unwrap();
        for appointment in appointments.iter_mut() {
            if ids.contains(&appointment.id) && appointment.status == AppointmentStatus::Booked {
                appointment.status = AppointmentStatus::Completed;
            }
        }
        Ok(())
    }
}

/// Static business configuration for tests.
pub struct InMemoryConfigRepo {
    pub availability: BusinessAvailability,
    pub policy: BookingPolicy,
    pub owner_email: String,
    pub services: Mutex<HashMap<Uuid, Service>>,
}

impl InMemoryConfigRepo {
    pub fn new(availability: BusinessAvailability, owner_email: &str) -> Self {
        Self {
            availability,
            policy: BookingPolicy::default(),
            owner_email: owner_email.to_string(),
            services: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_policy(mut self, policy: BookingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn add_service(&self, service: Service) {
        self.services.lock().unwrap().insert(service.id, service);
    }
}

#[async_trait]
impl BusinessConfigRepository for InMemoryConfigRepo {
    async fn get_availability(&self, _business_id: Uuid) -> BookingResult<BusinessAvailability> {
        Ok(self.availability.clone())
    }

    async fn get_policy(&self, _business_id: Uuid) -> BookingResult<BookingPolicy> {
        Ok(self.policy)
    }

    async fn get_owner_email(&self, _business_id: Uuid) -> BookingResult<String> {
        Ok(self.owner_email.clone())
    }

    async fn find_service(
        &self,
        business_id: Uuid,
        service_id: Uuid,
    ) -> BookingResult<Option<Service>> {
        Ok(self
            .services
            .lock()
            .unwrap()
            .get(&service_id)
            .filter(|service| service.business_id == business_id)
            .cloned())
    }
}
