//! Shared test harness: the full router over in-memory repositories and a
//! pinned clock (2026-09-01 12:00 UTC).

use std::collections::HashMap;
use std::sync::Arc;

use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use slotwise_api::{router, ApiState};
use slotwise_core::booking::BookingService;
use slotwise_core::clock::FixedClock;
use slotwise_core::models::availability::BusinessAvailability;
use slotwise_core::models::business::{BookingPolicy, Service};
use slotwise_core::time::{TimeInterval, TimeOfDay};
use slotwise_db::mock::memory::{InMemoryAppointmentRepo, InMemoryConfigRepo};

pub struct TestApp {
    pub server: TestServer,
    pub business_id: Uuid,
    pub service: Service,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(BookingPolicy::default())
}

/// Business open 09:00-17:00 UTC every day, one 30-minute service.
pub fn spawn_app_with(policy: BookingPolicy) -> TestApp {
    let business_id = Uuid::new_v4();
    let service = Service {
        id: Uuid::new_v4(),
        business_id,
        name: "Haircut".to_string(),
        duration_minutes: 30,
        is_active: true,
    };

    let hours = vec![TimeInterval::new(
        TimeOfDay::parse("09:00").unwrap(),
        TimeOfDay::parse("17:00").unwrap(),
    )
    .unwrap()];
    let weekly_hours: HashMap<u8, Vec<TimeInterval>> =
        (0..7).map(|day| (day, hours.clone())).collect();
    let availability = BusinessAvailability {
        timezone: "UTC".to_string(),
        weekly_hours,
        overrides: HashMap::new(),
    };

    let config =
        Arc::new(InMemoryConfigRepo::new(availability, "owner@example.com").with_policy(policy));
    config.add_service(service.clone());

    let clock = Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap(),
    ));
    let state = Arc::new(ApiState {
        booking: BookingService::new(Arc::new(InMemoryAppointmentRepo::new()), config, clock),
    });

    TestApp {
        server: TestServer::new(router(state)).expect("test server"),
        business_id,
        service,
    }
}
