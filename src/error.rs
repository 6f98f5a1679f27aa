use thiserror::Error;
use uuid::Uuid;

/// Failure raised by the validation/normalization pipeline before anything
/// touches the store. Every variant names the offending field so the API can
/// return a field-attributed message.
///
/// Checks run in a fixed order, string fields before array fields; the first
/// failure wins.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required and must be non-empty")]
    EmptyField(&'static str),

    #[error("{field}[{index}] must be a non-empty string")]
    InvalidArrayElement { field: &'static str, index: usize },

    #[error("invalid {field} format: {value:?}")]
    InvalidFormat { field: &'static str, value: String },

    #[error("{field} out of range: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    #[error("title must contain at least one letter or digit")]
    EmptySlug,

    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),
}

/// Failure raised by the persistence layer. Conflicts detected through the
/// unique indexes are kept distinct from plain database errors so racing
/// writers surface as 409s, not 500s.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("an event with slug {0:?} already exists")]
    SlugTaken(String),

    #[error("event {event_id} is already booked by {email}")]
    DuplicateBooking { event_id: Uuid, email: String },

    #[error("event not found: {0}")]
    EventNotFound(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
