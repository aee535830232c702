use chrono::NaiveDate;

use crate::models::BookingStatus;
use crate::services::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("time slot {time} on {date} is already booked")]
    SlotUnavailable { date: NaiveDate, time: String },

    #[error("please wait {retry_after_secs}s before submitting again")]
    RateLimited { retry_after_secs: u64 },

    #[error("booking not found: {0}")]
    NotFound(String),

    #[error("unknown booking status: {0}")]
    InvalidStatus(String),

    #[error("cannot change booking status from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
}
