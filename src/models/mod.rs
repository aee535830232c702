pub mod booking;
pub mod catalog;

pub use booking::{Booking, BookingStats, BookingStatus, NewBooking};
