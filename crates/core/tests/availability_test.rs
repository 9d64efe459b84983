use std::collections::HashMap;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use slotwise_core::models::availability::BusinessAvailability;
use slotwise_core::time::{TimeInterval, TimeOfDay};

fn t(s: &str) -> TimeOfDay {
    TimeOfDay::parse(s).expect("valid time")
}

fn interval(start: &str, end: &str) -> TimeInterval {
    TimeInterval::new(t(start), t(end)).expect("valid interval")
}

fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

// 2026-09-01 is a Tuesday (weekday index 2, 0=Sunday).
const TUESDAY: &str = "2026-09-01";

fn availability() -> BusinessAvailability {
    let mut weekly_hours = HashMap::new();
    weekly_hours.insert(2, vec![interval("09:00", "13:00"), interval("14:00", "18:00")]);
    BusinessAvailability {
        timezone: "UTC".to_string(),
        weekly_hours,
        overrides: HashMap::new(),
    }
}

#[test]
fn resolves_weekday_hours() {
    assert_eq!(
        availability().open_intervals_for(date(TUESDAY)),
        vec![interval("09:00", "13:00"), interval("14:00", "18:00")]
    );
}

#[test]
fn unconfigured_weekday_is_closed() {
    // 2026-09-02 is a Wednesday, which has no entry.
    assert_eq!(availability().open_intervals_for(date("2026-09-02")), vec![]);
}

#[test]
fn overlapping_configured_intervals_are_merged() {
    let mut avail = availability();
    avail.weekly_hours.insert(
        2,
        vec![
            interval("10:00", "12:00"),
            interval("09:00", "11:00"),
            interval("12:00", "13:00"),
        ],
    );

    assert_eq!(
        avail.open_intervals_for(date(TUESDAY)),
        vec![interval("09:00", "13:00")]
    );
}

#[test]
fn closed_date_override_beats_weekly_hours() {
    let mut avail = availability();
    avail.overrides.insert(date(TUESDAY), vec![]);

    assert_eq!(avail.open_intervals_for(date(TUESDAY)), vec![]);
}

#[test]
fn custom_hours_override_beats_weekly_hours() {
    let mut avail = availability();
    avail.overrides
        .insert(date(TUESDAY), vec![interval("11:00", "12:00")]);

    assert_eq!(
        avail.open_intervals_for(date(TUESDAY)),
        vec![interval("11:00", "12:00")]
    );
}

#[test]
fn override_only_affects_its_own_date() {
    let mut avail = availability();
    avail.overrides.insert(date(TUESDAY), vec![]);

    // Next Tuesday keeps the weekly hours.
    assert_eq!(
        avail.open_intervals_for(date("2026-09-08")),
        vec![interval("09:00", "13:00"), interval("14:00", "18:00")]
    );
}
