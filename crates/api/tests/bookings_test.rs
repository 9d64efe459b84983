mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use slotwise_core::models::appointment::Appointment;
use slotwise_core::models::business::BookingPolicy;

use common::{spawn_app, spawn_app_with, TestApp};

async fn book(app: &TestApp, day: &str, start: &str, email: &str) -> Appointment {
    let response = app
        .server
        .post(&format!("/api/businesses/{}/bookings", app.business_id))
        .json(&json!({
            "date": day,
            "start_time": start,
            "service_id": app.service.id,
            "customer_email": email,
            "customer_name": null,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Appointment>()
}

#[tokio::test]
async fn create_booking_returns_201_with_appointment() {
    let app = spawn_app();

    let response = app
        .server
        .post(&format!("/api/businesses/{}/bookings", app.business_id))
        .json(&json!({
            "date": "2026-09-03",
            "start_time": "10:00",
            "service_id": app.service.id,
            "customer_email": "Dana@Example.com",
            "customer_name": "Dana",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["date"], "2026-09-03");
    assert_eq!(body["start_time"], "10:00");
    assert_eq!(body["end_time"], "10:30");
    assert_eq!(body["status"], "BOOKED");
    assert_eq!(body["customer_email"], "dana@example.com");
    assert_eq!(body["service_name"], "Haircut");
}

#[tokio::test]
async fn taken_slot_is_409_slot_no_longer_available() {
    let app = spawn_app();
    book(&app, "2026-09-03", "10:00", "a@example.com").await;

    let response = app
        .server
        .post(&format!("/api/businesses/{}/bookings", app.business_id))
        .json(&json!({
            "date": "2026-09-03",
            "start_time": "10:00",
            "service_id": app.service.id,
            "customer_email": "b@example.com",
            "customer_name": null,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["code"], "SLOT_NO_LONGER_AVAILABLE");
}

#[tokio::test]
async fn policy_conflict_is_409_with_existing_appointments() {
    let app = spawn_app_with(BookingPolicy {
        limit_to_one_upcoming: true,
    });
    let first = book(&app, "2026-09-03", "10:00", "a@example.com").await;

    let response = app
        .server
        .post(&format!("/api/businesses/{}/bookings", app.business_id))
        .json(&json!({
            "date": "2026-09-04",
            "start_time": "11:00",
            "service_id": app.service.id,
            "customer_email": "a@example.com",
            "customer_name": null,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "ACTIVE_APPOINTMENT_EXISTS");
    let existing = body["existing_appointments"].as_array().unwrap();
    assert_eq!(existing.len(), 1);
    assert_eq!(existing[0]["id"], first.id.to_string());
}

#[tokio::test]
async fn same_service_same_day_is_409() {
    let app = spawn_app();
    book(&app, "2026-09-03", "10:00", "a@example.com").await;

    let response = app
        .server
        .post(&format!("/api/businesses/{}/bookings", app.business_id))
        .json(&json!({
            "date": "2026-09-03",
            "start_time": "14:00",
            "service_id": app.service.id,
            "customer_email": "a@example.com",
            "customer_name": null,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["code"],
        "SAME_SERVICE_SAME_DAY_EXISTS"
    );
}

#[tokio::test]
async fn empty_email_is_400_validation() {
    let app = spawn_app();

    let response = app
        .server
        .post(&format!("/api/businesses/{}/bookings", app.business_id))
        .json(&json!({
            "date": "2026-09-03",
            "start_time": "10:00",
            "service_id": app.service.id,
            "customer_email": "   ",
            "customer_name": null,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "VALIDATION");
}

#[tokio::test]
async fn unknown_service_is_404() {
    let app = spawn_app();

    let response = app
        .server
        .post(&format!("/api/businesses/{}/bookings", app.business_id))
        .json(&json!({
            "date": "2026-09-03",
            "start_time": "10:00",
            "service_id": Uuid::new_v4(),
            "customer_email": "a@example.com",
            "customer_name": null,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reschedule_moves_the_appointment() {
    let app = spawn_app();
    let appointment = book(&app, "2026-09-03", "10:00", "a@example.com").await;

    let response = app
        .server
        .put(&format!("/api/bookings/{}/reschedule", appointment.id))
        .json(&json!({ "date": "2026-09-04", "start_time": "15:00" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["id"], appointment.id.to_string());
    assert_eq!(body["date"], "2026-09-04");
    assert_eq!(body["start_time"], "15:00");
    assert_eq!(body["end_time"], "15:30");
    assert!(!body["rescheduled_at"].is_null());
}

#[tokio::test]
async fn reschedule_to_past_is_400() {
    let app = spawn_app();
    let appointment = book(&app, "2026-09-03", "10:00", "a@example.com").await;

    let response = app
        .server
        .put(&format!("/api/bookings/{}/reschedule", appointment.id))
        .json(&json!({ "date": "2026-08-31", "start_time": "10:00" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "PAST_DATE");
}

#[tokio::test]
async fn reschedule_of_cancelled_appointment_is_409() {
    let app = spawn_app();
    let appointment = book(&app, "2026-09-03", "10:00", "a@example.com").await;
    app.server
        .post(&format!("/api/bookings/{}/cancel", appointment.id))
        .json(&json!({ "cancelled_by": "customer" }))
        .await;

    let response = app
        .server
        .put(&format!("/api/bookings/{}/reschedule", appointment.id))
        .json(&json!({ "date": "2026-09-04", "start_time": "15:00" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["code"], "NOT_BOOKED");
}

#[tokio::test]
async fn cancel_is_idempotent_over_http() {
    let app = spawn_app();
    let appointment = book(&app, "2026-09-03", "10:00", "a@example.com").await;

    let first = app
        .server
        .post(&format!("/api/bookings/{}/cancel", appointment.id))
        .json(&json!({ "cancelled_by": "customer" }))
        .await;
    assert_eq!(first.status_code(), StatusCode::OK);
    assert_eq!(first.json::<Value>()["status"], "CANCELLED");

    let second = app
        .server
        .post(&format!("/api/bookings/{}/cancel", appointment.id))
        .json(&json!({ "cancelled_by": "customer" }))
        .await;
    assert_eq!(second.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn cancel_of_unknown_appointment_is_404() {
    let app = spawn_app();

    let response = app
        .server
        .post(&format!("/api/bookings/{}/cancel", Uuid::new_v4()))
        .json(&json!({ "cancelled_by": "customer" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cancelled_slot_reappears_in_listing() {
    let app = spawn_app();
    let appointment = book(&app, "2026-09-03", "10:00", "a@example.com").await;

    let before = app
        .server
        .get(&format!("/api/businesses/{}/slots", app.business_id))
        .add_query_param("date", "2026-09-03")
        .add_query_param("service_id", app.service.id.to_string())
        .await
        .json::<Value>();
    assert!(!before["slots"]
        .as_array()
        .unwrap()
        .iter()
        .any(|slot| slot["start_time"] == "10:00"));

    app.server
        .post(&format!("/api/bookings/{}/cancel", appointment.id))
        .json(&json!({ "cancelled_by": "business" }))
        .await;

    let after = app
        .server
        .get(&format!("/api/businesses/{}/slots", app.business_id))
        .add_query_param("date", "2026-09-03")
        .add_query_param("service_id", app.service.id.to_string())
        .await
        .json::<Value>();
    assert!(after["slots"]
        .as_array()
        .unwrap()
        .iter()
        .any(|slot| slot["start_time"] == "10:00"));
}
