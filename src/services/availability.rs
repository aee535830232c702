use chrono::NaiveDate;

use crate::models::catalog::TIME_SLOTS;
use crate::models::{Booking, BookingStatus};

/// True unless a non-cancelled booking already occupies `(date, time)`.
/// Pure function of the snapshot it is handed; nothing is cached.
pub fn is_slot_available(bookings: &[Booking], date: NaiveDate, time: &str) -> bool {
    !bookings
        .iter()
        .any(|b| b.date == date && b.time == time && b.status != BookingStatus::Cancelled)
}

/// The fixed slot catalog minus the non-cancelled booked times for `date`,
/// in catalog order.
pub fn available_slots(bookings: &[Booking], date: NaiveDate) -> Vec<&'static str> {
    TIME_SLOTS
        .iter()
        .copied()
        .filter(|slot| is_slot_available(bookings, date, slot))
        .collect()
}
