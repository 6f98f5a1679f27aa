use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::Booking;

pub struct BookingRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BookingRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts the booking. The compound unique index on `(event_id, email)`
    /// decides duplicates and the foreign key decides whether the event is
    /// real, so the check-then-insert race cannot produce a double booking.
    pub async fn create(&self, booking: &Booking) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO evently_bookings (id, event_id, email, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(booking.id)
        .bind(booking.event_id)
        .bind(&booking.email)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::DuplicateBooking {
                    event_id: booking.event_id,
                    email: booking.email.clone(),
                }
            }
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                StoreError::EventNotFound(booking.event_id)
            }
            other => StoreError::Database(other),
        })?;

        Ok(())
    }

    pub async fn count_by_event(&self, event_id: Uuid) -> Result<i64, StoreError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM evently_bookings WHERE event_id = ?")
                .bind(event_id)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }
}
