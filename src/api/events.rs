use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::{error, info};

use crate::api::{response::ApiError, AppState};
use crate::error::StoreError;
use crate::models::event::{CreateEvent, Event, UpdateEvent};
use crate::normalize::is_valid_slug;
use crate::repositories::{BookingRepository, EventRepository};

#[axum::debug_handler]
pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<CreateEvent>,
) -> Result<impl IntoResponse, ApiError> {
    let event = Event::new(payload)?;

    let pool = state.db.pool().await?;
    EventRepository::new(pool).create(&event).await?;

    info!("Created event {} ({})", event.id, event.slug);
    Ok((StatusCode::CREATED, Json(json!(event))))
}

pub async fn list_events(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let pool = state.db.pool().await?;
    let events = EventRepository::new(pool).list_all().await?;

    Ok((StatusCode::OK, Json(json!(events))))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let slug = slug.trim().to_lowercase();
    if !is_valid_slug(&slug) {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid slug format"})),
        ));
    }

    let pool = state.db.pool().await?;
    match EventRepository::new(pool).find_by_slug(&slug).await? {
        Some(event) => Ok((StatusCode::OK, Json(json!(event)))),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Event not found"})),
        )),
    }
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateEvent>,
) -> Result<impl IntoResponse, ApiError> {
    let slug = slug.trim().to_lowercase();
    if !is_valid_slug(&slug) {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid slug format"})),
        ));
    }

    let pool = state.db.pool().await?;
    let repository = EventRepository::new(pool);

    let mut event = match repository.find_by_slug(&slug).await? {
        Some(event) => event,
        None => {
            return Ok((
                StatusCode::NOT_FOUND,
                Json(json!({"error": "Event not found"})),
            ));
        }
    };

    event.apply(payload)?;
    repository.update(&event).await?;

    info!("Updated event {} ({})", event.id, event.slug);
    Ok((StatusCode::OK, Json(json!(event))))
}

pub async fn get_similar_events(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let slug = slug.trim().to_lowercase();

    // Best effort: this feeds a recommendation strip, so any failure
    // degrades to an empty list instead of an error response.
    let events = match similar_events(&state, &slug).await {
        Ok(events) => events,
        Err(err) => {
            error!("Failed to load similar events for {}: {}", slug, err);
            Vec::new()
        }
    };

    Ok((StatusCode::OK, Json(json!(events))))
}

async fn similar_events(state: &AppState, slug: &str) -> Result<Vec<Event>, StoreError> {
    let pool = state.db.pool().await?;
    let repository = EventRepository::new(pool);

    let event = match repository.find_by_slug(slug).await? {
        Some(event) => event,
        None => return Ok(Vec::new()),
    };

    repository.find_similar(&event).await
}

pub async fn get_event_bookings(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let slug = slug.trim().to_lowercase();
    if !is_valid_slug(&slug) {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid slug format"})),
        ));
    }

    let pool = state.db.pool().await?;
    let event = match EventRepository::new(pool).find_by_slug(&slug).await? {
        Some(event) => event,
        None => {
            return Ok((
                StatusCode::NOT_FOUND,
                Json(json!({"error": "Event not found"})),
            ));
        }
    };

    let count = BookingRepository::new(pool).count_by_event(event.id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({"event_id": event.id, "count": count})),
    ))
}
