use anyhow::Context;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db;
use crate::models::Booking;

/// Key the whole booking list lives under. The store is a key-value table
/// holding one serialized JSON array; every save rewrites the entire blob.
const STORAGE_KEY: &str = "hair_salon_bookings";

pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    pub fn open(path: &str) -> anyhow::Result<Self> {
        let conn = db::init_db(path)?;
        Ok(Self { conn })
    }

    /// Returns the persisted list, or an empty list when the blob is absent
    /// or unreadable. Parse and read failures are logged, never raised.
    pub fn load(&self) -> Vec<Booking> {
        let stored: Option<String> = match self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()
        {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "error loading bookings");
                return Vec::new();
            }
        };

        match stored {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::error!(error = %e, "error parsing stored bookings");
                Vec::new()
            }),
            None => Vec::new(),
        }
    }

    /// Serializes the full list and overwrites the blob. Fire-and-forget for
    /// callers on the booking-creation path; they log the error and move on.
    pub fn save(&self, bookings: &[Booking]) -> anyhow::Result<()> {
        let json = serde_json::to_string(bookings).context("failed to serialize bookings")?;

        self.conn
            .execute(
                "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![STORAGE_KEY, json],
            )
            .context("failed to save bookings")?;

        Ok(())
    }
}
