use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use mockall::mock;
use uuid::Uuid;

use slotwise_core::errors::BookingResult;
use slotwise_core::models::appointment::Appointment;
use slotwise_core::models::availability::BusinessAvailability;
use slotwise_core::models::business::{BookingPolicy, Service};
use slotwise_core::repository::{
    AppointmentRepository, BusinessConfigRepository, WriteOutcome,
};
use slotwise_core::time::TimeOfDay;

// Mock repositories for testing failure paths

mock! {
    pub AppointmentRepo {}

    #[async_trait]
    impl AppointmentRepository for AppointmentRepo {
        async fn find_by_id(&self, id: Uuid) -> BookingResult<Option<Appointment>>;

        async fn find_booked_for_date(
            &self,
            business_id: Uuid,
            date: NaiveDate,
        ) -> BookingResult<Vec<Appointment>>;

        async fn find_booked_for_customer(
            &self,
            business_id: Uuid,
            customer_email: &str,
            from_date: NaiveDate,
        ) -> BookingResult<Vec<Appointment>>;

        async fn insert_if_no_overlap(
            &self,
            appointment: Appointment,
        ) -> BookingResult<WriteOutcome>;

        async fn reschedule_if_no_overlap(
            &self,
            id: Uuid,
            date: NaiveDate,
            start_time: TimeOfDay,
            end_time: TimeOfDay,
            rescheduled_at: DateTime<Utc>,
        ) -> BookingResult<WriteOutcome>;

        async fn mark_cancelled(&self, id: Uuid, cancelled_by: &str) -> BookingResult<Appointment>;

        async fn mark_completed(&self, ids: &[Uuid]) -> BookingResult<()>;
    }
}

mock! {
    pub ConfigRepo {}

    #[async_trait]
    impl BusinessConfigRepository for ConfigRepo {
        async fn get_availability(&self, business_id: Uuid) -> BookingResult<BusinessAvailability>;

        async fn get_policy(&self, business_id: Uuid) -> BookingResult<BookingPolicy>;

        async fn get_owner_email(&self, business_id: Uuid) -> BookingResult<String>;

        async fn find_service(
            &self,
            business_id: Uuid,
            service_id: Uuid,
        ) -> BookingResult<Option<Service>>;
    }
}
