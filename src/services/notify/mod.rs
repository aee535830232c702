pub mod emailjs;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::models::catalog::service_display_name;
use crate::models::Booking;

/// Outbound notification seam. One implementation talks to EmailJS; tests
/// plug in mocks.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, params: &TemplateParams) -> anyhow::Result<()>;
}

/// Flat variable mapping the email template expects.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TemplateParams {
    pub to_name: String,
    pub from_name: String,
    pub from_email: String,
    pub time: String,
    pub message: String,
    pub to_email: String,
}

pub fn booking_params(booking: &Booking, business_email: &str) -> TemplateParams {
    TemplateParams {
        to_name: "Salon Team".to_string(),
        from_name: booking.customer_name.clone(),
        from_email: booking.email.clone(),
        time: format!("{} at {}", booking.date, booking.time),
        message: build_message(booking),
        to_email: business_email.to_string(),
    }
}

/// Fixed multi-line body summarizing the booking for the business inbox.
pub fn build_message(booking: &Booking) -> String {
    let mut lines = vec![
        "New booking request".to_string(),
        String::new(),
        format!("Booking ID: {}", booking.id),
        format!("Service: {}", service_display_name(&booking.service)),
        format!("Date: {} at {}", booking.date, booking.time),
        format!("Phone: {}", booking.phone),
        format!("Hair: {} / {}", booking.hair_length, booking.hair_texture),
    ];

    if let Some(notes) = &booking.special_requests {
        lines.push(format!("Notes: {notes}"));
    }
    if let Some(address) = &booking.address {
        let mut full = address.clone();
        if let Some(city) = &booking.city {
            full.push_str(&format!(", {city}"));
        }
        if let Some(zip) = &booking.zip_code {
            full.push_str(&format!(" {zip}"));
        }
        lines.push(format!("Address: {full}"));
    }

    lines.push(format!("Status: {}", booking.status));
    lines.push(format!("Created: {}", booking.created_at.format("%Y-%m-%d %H:%M:%S UTC")));

    lines.join("\n")
}

/// Detached, at-most-one-attempt dispatch. A failed send is logged, with the
/// booking details emitted locally as fallback; the created booking is never
/// affected by the outcome.
pub fn dispatch(
    notifier: Arc<dyn Notifier>,
    business_email: String,
    booking: Booking,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let params = booking_params(&booking, &business_email);
        match notifier.send(&params).await {
            Ok(()) => {
                tracing::info!(id = %booking.id, to = %business_email, "booking notification sent");
            }
            Err(e) => {
                tracing::error!(id = %booking.id, error = %e, "booking notification failed");
                tracing::info!(
                    id = %booking.id,
                    details = %params.message,
                    "booking notification fallback record"
                );
            }
        }
    })
}
