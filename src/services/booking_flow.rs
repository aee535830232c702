use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::errors::BookingError;
use crate::models::Booking;
use crate::repository::BookingRepository;
use crate::services::availability;
use crate::services::notify::{self, Notifier};
use crate::services::validation::{self, BookingRequest, RateLimiter};

/// Result of a successful submission. The notification runs as a detached
/// task; callers that care about its outcome (tests, mostly) can await the
/// handle, everyone else drops it.
#[derive(Debug)]
pub struct SubmissionReceipt {
    pub booking: Booking,
    pub notification: JoinHandle<()>,
}

/// The full form workflow: rate limit, validate, gate on slot availability,
/// create, then fire the notification. The booking is committed before the
/// notification is attempted and is never rolled back by a send failure.
pub fn submit_booking(
    repo: &mut BookingRepository,
    limiter: &mut RateLimiter,
    notifier: Arc<dyn Notifier>,
    business_email: &str,
    request: &BookingRequest,
) -> Result<SubmissionReceipt, BookingError> {
    limiter.check()?;

    let errors = validation::validate(request);
    if !errors.is_empty() {
        return Err(BookingError::Validation(errors));
    }

    let data = validation::sanitize(request)?;

    if !availability::is_slot_available(repo.get_all(), data.date, &data.time) {
        return Err(BookingError::SlotUnavailable {
            date: data.date,
            time: data.time,
        });
    }

    let booking = repo.create(data);
    limiter.record();

    let notification = notify::dispatch(notifier, business_email.to_string(), booking.clone());

    Ok(SubmissionReceipt {
        booking,
        notification,
    })
}
