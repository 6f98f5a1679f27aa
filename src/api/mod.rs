pub mod bookings;
pub mod events;
pub mod health;
pub mod response;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::db::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

pub fn build_router(db: Database) -> Router {
    let state = AppState { db: Arc::new(db) };

    Router::new()
        .route("/health", get(health::health_check))
        .route("/events", get(events::list_events))
        .route("/events", post(events::create_event))
        .route("/events/{slug}", get(events::get_event))
        .route("/events/{slug}", put(events::update_event))
        .route("/events/{slug}/similar", get(events::get_similar_events))
        .route("/events/{slug}/bookings", get(events::get_event_bookings))
        .route("/bookings", post(bookings::create_booking))
        .with_state(state)
}
