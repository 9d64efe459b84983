use chrono::{DateTime, NaiveDate, Utc};
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use slotwise_core::models::appointment::Appointment;
use slotwise_core::models::availability::BusinessAvailability;
use slotwise_core::models::business::{BookingPolicy, Service};
use slotwise_core::time::TimeOfDay;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBusiness {
    pub id: Uuid,
    pub name: String,
    pub owner_email: String,
    pub timezone: String,
    pub weekly_hours: serde_json::Value,
    pub overrides: serde_json::Value,
    pub limit_to_one_upcoming: bool,
    pub created_at: DateTime<Utc>,
}

impl DbBusiness {
    pub fn availability(&self) -> Result<BusinessAvailability> {
        Ok(BusinessAvailability {
            timezone: self.timezone.clone(),
            weekly_hours: serde_json::from_value(self.weekly_hours.clone())?,
            overrides: serde_json::from_value(self.overrides.clone())?,
        })
    }

    pub fn policy(&self) -> BookingPolicy {
        BookingPolicy {
            limit_to_one_upcoming: self.limit_to_one_upcoming,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub duration_minutes: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl DbService {
    pub fn into_service(self) -> Result<Service> {
        Ok(Service {
            id: self.id,
            business_id: self.business_id,
            name: self.name,
            duration_minutes: u32::try_from(self.duration_minutes)
                .map_err(|_| eyre!("negative service duration: {}", self.duration_minutes))?,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub business_id: Uuid,
    pub customer_email: String,
    pub customer_name: Option<String>,
    pub service_id: Uuid,
    pub service_name: String,
    pub date: NaiveDate,
    pub start_minute: i32,
    pub end_minute: i32,
    pub duration_minutes: i32,
    pub status: String,
    pub cancelled_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub rescheduled_at: Option<DateTime<Utc>>,
}

fn minute_of_day(minute: i32) -> Result<TimeOfDay> {
    u16::try_from(minute)
        .ok()
        .and_then(TimeOfDay::from_minutes)
        .ok_or_else(|| eyre!("minute out of range: {minute}"))
}

impl DbAppointment {
    pub fn into_appointment(self) -> Result<Appointment> {
        Ok(Appointment {
            id: self.id,
            business_id: self.business_id,
            customer_email: self.customer_email,
            customer_name: self.customer_name,
            service_id: self.service_id,
            service_name: self.service_name,
            date: self.date,
            start_time: minute_of_day(self.start_minute)?,
            end_time: minute_of_day(self.end_minute)?,
            duration_minutes: u32::try_from(self.duration_minutes)
                .map_err(|_| eyre!("negative duration: {}", self.duration_minutes))?,
            status: self.status.parse().map_err(|e: String| eyre!(e))?,
            cancelled_by: self.cancelled_by,
            created_at: self.created_at,
            rescheduled_at: self.rescheduled_at,
        })
    }
}
