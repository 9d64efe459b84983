use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Slot no longer available: {0}")]
    SlotUnavailable(String),

    #[error("Appointment is not booked: {0}")]
    NotBooked(String),

    #[error("Requested time is in the past: {0}")]
    PastDate(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),
}

impl BookingError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            BookingError::NotFound(_) => "NOT_FOUND",
            BookingError::Validation(_) => "VALIDATION",
            BookingError::SlotUnavailable(_) => "SLOT_NO_LONGER_AVAILABLE",
            BookingError::NotBooked(_) => "NOT_BOOKED",
            BookingError::PastDate(_) => "PAST_DATE",
            BookingError::Database(_) => "INTERNAL",
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
