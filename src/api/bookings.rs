use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::info;

use crate::api::{response::ApiError, AppState};
use crate::models::booking::{Booking, CreateBooking};
use crate::repositories::{BookingRepository, EventRepository};

pub async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<CreateBooking>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = Booking::new(payload)?;

    let pool = state.db.pool().await?;
    if !EventRepository::new(pool).exists(booking.event_id).await? {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Event not found"})),
        ));
    }

    // The existence check races against concurrent writers; the unique and
    // foreign key constraints have the final say.
    BookingRepository::new(pool).create(&booking).await?;

    info!("Created booking {} for event {}", booking.id, booking.event_id);
    Ok((StatusCode::CREATED, Json(json!(booking))))
}
