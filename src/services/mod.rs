pub mod availability;
pub mod booking_flow;
pub mod notify;
pub mod validation;
