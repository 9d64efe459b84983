use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::{TimeInterval, TimeOfDay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Booked,
    Cancelled,
    Completed,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Booked => "BOOKED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::NoShow => "NO_SHOW",
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BOOKED" => Ok(AppointmentStatus::Booked),
            "CANCELLED" => Ok(AppointmentStatus::Cancelled),
            "COMPLETED" => Ok(AppointmentStatus::Completed),
            "NO_SHOW" => Ok(AppointmentStatus::NoShow),
            other => Err(format!("unknown appointment status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub business_id: Uuid,
    pub customer_email: String,
    pub customer_name: Option<String>,
    pub service_id: Uuid,
    /// Snapshot of the service name at booking time.
    pub service_name: String,
    /// Business-local calendar date, not UTC-shifted.
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub duration_minutes: u32,
    pub status: AppointmentStatus,
    pub cancelled_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub rescheduled_at: Option<DateTime<Utc>>,
}

impl Appointment {
    pub fn interval(&self) -> TimeInterval {
        TimeInterval {
            start: self.start_time,
            end: self.end_time,
        }
    }

    /// Whether this appointment's window has passed in business-local time.
    ///
    /// Drives the lazy completion sweep: a BOOKED appointment whose date is
    /// behind `today`, or whose end time has been reached today, rolls over
    /// to COMPLETED on the next read. There is no background scheduler.
    pub fn has_elapsed(&self, today: NaiveDate, now_time: TimeOfDay) -> bool {
        self.status == AppointmentStatus::Booked
            && (self.date < today || (self.date == today && self.end_time <= now_time))
    }

    /// Whether the appointment starts strictly after business-local now.
    pub fn is_upcoming(&self, today: NaiveDate, now_time: TimeOfDay) -> bool {
        (self.date, self.start_time) > (today, now_time)
    }
}
