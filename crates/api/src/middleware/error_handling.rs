//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error responses so the
//! whole API fails consistently. Policy conflicts are not errors and never
//! pass through here — handlers return them as 409 bodies directly.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use slotwise_core::errors::BookingError;

/// Application error wrapper that provides HTTP status code mapping.
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::PastDate(_) => StatusCode::BAD_REQUEST,
            BookingError::SlotUnavailable(_) => StatusCode::CONFLICT,
            BookingError::NotBooked(_) => StatusCode::CONFLICT,
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.0.to_string(),
            "code": self.0.code(),
        }));

        (status, body).into_response()
    }
}

/// Allows `?` on functions returning `Result<T, BookingError>` inside
/// handlers returning `Result<T, AppError>`.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Database(err))
    }
}
