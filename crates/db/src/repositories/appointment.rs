use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use slotwise_core::errors::{BookingError, BookingResult};
use slotwise_core::models::appointment::Appointment;
use slotwise_core::repository::{AppointmentRepository, WriteOutcome};
use slotwise_core::time::TimeOfDay;

use crate::models::DbAppointment;

const APPOINTMENT_COLUMNS: &str = "id, business_id, customer_email, customer_name, service_id, \
     service_name, date, start_minute, end_minute, duration_minutes, status, cancelled_by, \
     created_at, rescheduled_at";

// Postgres exclusion_violation: the no_overlapping_bookings constraint
// rejected the write. That is the conditional write losing a race, not a
// failure.
const EXCLUSION_VIOLATION: &str = "23P01";

pub struct PgAppointmentRepository {
    pool: Pool<Postgres>,
}

impl PgAppointmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn db_err(err: sqlx::Error) -> BookingError {
    BookingError::Database(err.into())
}

fn is_overlap(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(EXCLUSION_VIOLATION)
    )
}

fn into_appointment(row: DbAppointment) -> BookingResult<Appointment> {
    row.into_appointment().map_err(BookingError::Database)
}

#[async_trait]
impl AppointmentRepository for PgAppointmentRepository {
    async fn find_by_id(&self, id: Uuid) -> BookingResult<Option<Appointment>> {
        let row = sqlx::query_as::<_, DbAppointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(into_appointment).transpose()
    }

    async fn find_booked_for_date(
        &self,
        business_id: Uuid,
        date: NaiveDate,
    ) -> BookingResult<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, DbAppointment>(&format!(
            r#"
            SELECT {APPOINTMENT_COLUMNS}
            FROM appointments
            WHERE business_id = $1 AND date = $2 AND status = 'BOOKED'
            ORDER BY start_minute ASC
            "#
        ))
        .bind(business_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(into_appointment).collect()
    }

    async fn find_booked_for_customer(
        &self,
        business_id: Uuid,
        customer_email: &str,
        from_date: NaiveDate,
    ) -> BookingResult<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, DbAppointment>(&format!(
            r#"
            SELECT {APPOINTMENT_COLUMNS}
            FROM appointments
            WHERE business_id = $1 AND customer_email = $2
              AND status = 'BOOKED' AND date >= $3
            ORDER BY date ASC, start_minute ASC
            "#
        ))
        .bind(business_id)
        .bind(customer_email)
        .bind(from_date)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(into_appointment).collect()
    }

    async fn insert_if_no_overlap(&self, appointment: Appointment) -> BookingResult<WriteOutcome> {
        tracing::debug!(
            "Inserting appointment: id={}, business={}, date={}, start={}",
            appointment.id,
            appointment.business_id,
            appointment.date,
            appointment.start_time
        );

        let result = sqlx::query_as::<_, DbAppointment>(&format!(
            r#"
            INSERT INTO appointments (
                id, business_id, customer_email, customer_name, service_id, service_name,
                date, start_minute, end_minute, duration_minutes, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
        .bind(appointment.id)
        .bind(appointment.business_id)
        .bind(&appointment.customer_email)
        .bind(&appointment.customer_name)
        .bind(appointment.service_id)
        .bind(&appointment.service_name)
        .bind(appointment.date)
        .bind(i32::from(appointment.start_time.minutes()))
        .bind(i32::from(appointment.end_time.minutes()))
        .bind(appointment.duration_minutes as i32)
        .bind(appointment.status.as_str())
        .bind(appointment.created_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(WriteOutcome::Committed(into_appointment(row)?)),
            Err(err) if is_overlap(&err) => Ok(WriteOutcome::Overlap),
            Err(err) => Err(db_err(err)),
        }
    }

    async fn reschedule_if_no_overlap(
        &self,
        id: Uuid,
        date: NaiveDate,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        rescheduled_at: DateTime<Utc>,
    ) -> BookingResult<WriteOutcome> {
        let result = sqlx::query_as::<_, DbAppointment>(&format!(
            r#"
            UPDATE appointments
            SET date = $2, start_minute = $3, end_minute = $4, rescheduled_at = $5
            WHERE id = $1 AND status = 'BOOKED'
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(date)
        .bind(i32::from(start_time.minutes()))
        .bind(i32::from(end_time.minutes()))
        .bind(rescheduled_at)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(row)) => Ok(WriteOutcome::Committed(into_appointment(row)?)),
            Ok(None) => Err(BookingError::NotBooked(format!(
                "appointment {id} is not in BOOKED status"
            ))),
            Err(err) if is_overlap(&err) => Ok(WriteOutcome::Overlap),
            Err(err) => Err(db_err(err)),
        }
    }

    async fn mark_cancelled(&self, id: Uuid, cancelled_by: &str) -> BookingResult<Appointment> {
        let row = sqlx::query_as::<_, DbAppointment>(&format!(
            r#"
            UPDATE appointments
            SET status = 'CANCELLED', cancelled_by = $2
            WHERE id = $1
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(cancelled_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or_else(|| BookingError::NotFound(format!("Appointment with ID {id} not found")))?;

        into_appointment(row)
    }

    async fn mark_completed(&self, ids: &[Uuid]) -> BookingResult<()> {
        sqlx::query(
            r#"
            UPDATE appointments
            SET status = 'COMPLETED'
            WHERE id = ANY($1) AND status = 'BOOKED'
            "#,
        )
        .bind(ids)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }
}
