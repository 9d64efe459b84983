//! Business-local time resolution.
//!
//! Every "is this in the past" decision in the booking engine depends on
//! wall-clock time in the business's configured IANA timezone. These
//! helpers take an explicit `now` instant (no hidden system clock access)
//! and never fail: an invalid or empty timezone string falls back to UTC so
//! a misconfigured tenant can still take bookings.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

use crate::time::TimeOfDay;

/// Source of the current instant. Injected so tests can pin time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn resolve_zone(timezone: &str) -> Tz {
    timezone.parse::<Tz>().unwrap_or(Tz::UTC)
}

/// The calendar date of `now` in the given IANA timezone (UTC on fallback).
pub fn local_date(now: DateTime<Utc>, timezone: &str) -> NaiveDate {
    now.with_timezone(&resolve_zone(timezone)).date_naive()
}

/// The wall-clock time of `now` in the given IANA timezone (UTC on fallback).
pub fn local_time(now: DateTime<Utc>, timezone: &str) -> TimeOfDay {
    let local = now.with_timezone(&resolve_zone(timezone)).time();
    TimeOfDay::from_hm(local.hour() as u16, local.minute() as u16).unwrap_or(TimeOfDay::MIDNIGHT)
}

// Calendar arithmetic below operates on dates only, with no time-of-day
// component, so DST transitions cannot shift results.

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let result = if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    result.unwrap_or(date)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    add_days(add_months(start_of_month(date), 1), -1)
}
