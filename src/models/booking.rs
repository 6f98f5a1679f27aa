use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::normalize::validate_email;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,

    pub event_id: Uuid,

    pub email: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBooking {
    pub event_id: Uuid,
    pub email: String,
}

impl Booking {
    pub fn new(create: CreateBooking) -> Result<Self, ValidationError> {
        let email = validate_email(&create.email)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            event_id: create.event_id,
            email,
            created_at: now,
            updated_at: now,
        })
    }
}
