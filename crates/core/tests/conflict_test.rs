use chrono::{NaiveDate, Utc};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use slotwise_core::conflict::{check_conflicts, normalize_email, ConflictCode};
use slotwise_core::models::appointment::{Appointment, AppointmentStatus};
use slotwise_core::models::business::BookingPolicy;
use slotwise_core::time::TimeOfDay;

fn t(s: &str) -> TimeOfDay {
    TimeOfDay::parse(s).expect("valid time")
}

fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

fn appointment(
    service_id: Uuid,
    day: &str,
    start: &str,
    end: &str,
    status: AppointmentStatus,
) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        business_id: Uuid::new_v4(),
        customer_email: "customer@example.com".to_string(),
        customer_name: None,
        service_id,
        service_name: "Haircut".to_string(),
        date: date(day),
        start_time: t(start),
        end_time: t(end),
        duration_minutes: 30,
        status,
        cancelled_by: None,
        created_at: Utc::now(),
        rescheduled_at: None,
    }
}

const TODAY: &str = "2026-09-01";
const OWNER: &str = "owner@example.com";

fn limit_policy() -> BookingPolicy {
    BookingPolicy {
        limit_to_one_upcoming: true,
    }
}

#[test]
fn no_existing_appointments_passes() {
    let conflict = check_conflicts(
        date("2026-09-03"),
        Uuid::new_v4(),
        "customer@example.com",
        &[],
        &limit_policy(),
        OWNER,
        date(TODAY),
        t("12:00"),
    );

    assert!(conflict.is_none());
}

#[test]
fn upcoming_appointment_blocks_under_limit_policy() {
    let service = Uuid::new_v4();
    let existing = vec![appointment(
        service,
        "2026-09-05",
        "10:00",
        "10:30",
        AppointmentStatus::Booked,
    )];

    let conflict = check_conflicts(
        date("2026-09-10"),
        Uuid::new_v4(),
        "customer@example.com",
        &existing,
        &limit_policy(),
        OWNER,
        date(TODAY),
        t("12:00"),
    )
    .expect("expected a conflict");

    assert_eq!(conflict.code, ConflictCode::ActiveAppointmentExists);
    assert_eq!(conflict.existing_appointments.len(), 1);
    assert_eq!(conflict.existing_appointments[0].id, existing[0].id);
}

#[test]
fn past_appointment_does_not_block_under_limit_policy() {
    let existing = vec![appointment(
        Uuid::new_v4(),
        TODAY,
        "10:00",
        "10:30",
        AppointmentStatus::Booked,
    )];

    // now is 12:00, the existing appointment started at 10:00 today
    let conflict = check_conflicts(
        date("2026-09-10"),
        Uuid::new_v4(),
        "customer@example.com",
        &existing,
        &limit_policy(),
        OWNER,
        date(TODAY),
        t("12:00"),
    );

    assert!(conflict.is_none());
}

#[test]
fn cancelled_appointments_never_conflict() {
    let service = Uuid::new_v4();
    let existing = vec![
        appointment(service, "2026-09-05", "10:00", "10:30", AppointmentStatus::Cancelled),
        appointment(service, "2026-09-05", "11:00", "11:30", AppointmentStatus::Completed),
    ];

    let conflict = check_conflicts(
        date("2026-09-05"),
        service,
        "customer@example.com",
        &existing,
        &limit_policy(),
        OWNER,
        date(TODAY),
        t("12:00"),
    );

    assert!(conflict.is_none());
}

#[test]
fn same_service_same_day_blocks_even_without_limit_policy() {
    let service = Uuid::new_v4();
    let existing = vec![appointment(
        service,
        "2026-09-05",
        "10:00",
        "10:30",
        AppointmentStatus::Booked,
    )];

    let conflict = check_conflicts(
        date("2026-09-05"),
        service,
        "customer@example.com",
        &existing,
        &BookingPolicy::default(),
        OWNER,
        date(TODAY),
        t("12:00"),
    )
    .expect("expected a conflict");

    assert_eq!(conflict.code, ConflictCode::SameServiceSameDay);
}

#[test]
fn different_service_same_day_passes_without_limit_policy() {
    let existing = vec![appointment(
        Uuid::new_v4(),
        "2026-09-05",
        "10:00",
        "10:30",
        AppointmentStatus::Booked,
    )];

    let conflict = check_conflicts(
        date("2026-09-05"),
        Uuid::new_v4(),
        "customer@example.com",
        &existing,
        &BookingPolicy::default(),
        OWNER,
        date(TODAY),
        t("12:00"),
    );

    assert!(conflict.is_none());
}

#[test]
fn limit_policy_takes_precedence_over_duplicate_check() {
    let service = Uuid::new_v4();
    let existing = vec![appointment(
        service,
        "2026-09-05",
        "10:00",
        "10:30",
        AppointmentStatus::Booked,
    )];

    let conflict = check_conflicts(
        date("2026-09-05"),
        service,
        "customer@example.com",
        &existing,
        &limit_policy(),
        OWNER,
        date(TODAY),
        t("12:00"),
    )
    .expect("expected a conflict");

    assert_eq!(conflict.code, ConflictCode::ActiveAppointmentExists);
}

#[test]
fn owner_bypasses_all_policies() {
    let service = Uuid::new_v4();
    let existing = vec![appointment(
        service,
        "2026-09-05",
        "10:00",
        "10:30",
        AppointmentStatus::Booked,
    )];

    // Owner email matching is normalized: case and whitespace insensitive.
    let conflict = check_conflicts(
        date("2026-09-05"),
        service,
        "  Owner@Example.COM ",
        &existing,
        &limit_policy(),
        OWNER,
        date(TODAY),
        t("12:00"),
    );

    assert!(conflict.is_none());
}

#[test]
fn email_normalization_trims_and_lowercases() {
    assert_eq!(normalize_email("  Foo@BAR.com "), "foo@bar.com");
}
