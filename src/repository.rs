use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::db::RecordStore;
use crate::errors::BookingError;
use crate::models::{Booking, BookingStats, BookingStatus, NewBooking};

/// CRUD and queries over the booking list. The list is loaded once at
/// construction, kept resident, and written back through the store after
/// every mutation. Records are never physically deleted; cancellation is a
/// status change.
pub struct BookingRepository {
    store: RecordStore,
    bookings: Vec<Booking>,
}

impl BookingRepository {
    pub fn open(store: RecordStore) -> Self {
        let bookings = store.load();
        tracing::info!(count = bookings.len(), "loaded booking records");
        Self { store, bookings }
    }

    pub fn create(&mut self, data: NewBooking) -> Booking {
        let now = Utc::now();
        let booking = Booking {
            id: generate_booking_id(),
            customer_name: data.customer_name,
            email: data.email,
            phone: data.phone,
            service: data.service,
            date: data.date,
            time: data.time,
            hair_length: data.hair_length,
            hair_texture: data.hair_texture,
            special_requests: data.special_requests,
            address: data.address,
            city: data.city,
            zip_code: data.zip_code,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        self.bookings.push(booking.clone());
        self.persist();

        tracing::info!(id = %booking.id, service = %booking.service, "created booking");
        booking
    }

    pub fn get_all(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    pub fn get_by_date(&self, date: NaiveDate) -> Vec<&Booking> {
        self.bookings.iter().filter(|b| b.date == date).collect()
    }

    pub fn get_by_service(&self, service: &str) -> Vec<&Booking> {
        self.bookings.iter().filter(|b| b.service == service).collect()
    }

    /// Case-insensitive match, used by the customer lookup flow.
    pub fn get_by_email(&self, email: &str) -> Vec<&Booking> {
        self.bookings
            .iter()
            .filter(|b| b.email.eq_ignore_ascii_case(email))
            .collect()
    }

    pub fn update_status(
        &mut self,
        id: &str,
        status: BookingStatus,
    ) -> Result<&Booking, BookingError> {
        let idx = self
            .bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| BookingError::NotFound(id.to_string()))?;

        let from = self.bookings[idx].status;
        if !from.can_transition_to(status) {
            return Err(BookingError::InvalidTransition { from, to: status });
        }

        self.bookings[idx].status = status;
        self.bookings[idx].updated_at = Utc::now();
        self.persist();

        tracing::info!(id, from = %from, to = %status, "updated booking status");
        Ok(&self.bookings[idx])
    }

    pub fn cancel(&mut self, id: &str) -> Result<&Booking, BookingError> {
        self.update_status(id, BookingStatus::Cancelled)
    }

    /// Counts by status, recomputed from the full list on every call.
    pub fn stats(&self) -> BookingStats {
        let mut stats = BookingStats {
            total: self.bookings.len(),
            ..Default::default()
        };
        for booking in &self.bookings {
            match booking.status {
                BookingStatus::Pending => stats.pending += 1,
                BookingStatus::Confirmed => stats.confirmed += 1,
                BookingStatus::Completed => stats.completed += 1,
                BookingStatus::Cancelled => stats.cancelled += 1,
            }
        }
        stats
    }

    // Persist failures degrade to in-memory only for this session.
    fn persist(&self) {
        if let Err(e) = self.store.save(&self.bookings) {
            tracing::error!(error = %e, "error saving bookings");
        }
    }
}

/// Opaque unique id: "BK" + epoch millis + 5-char random suffix.
fn generate_booking_id() -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(5)
        .collect::<String>()
        .to_uppercase();
    format!("BK{}{}", Utc::now().timestamp_millis(), suffix)
}
