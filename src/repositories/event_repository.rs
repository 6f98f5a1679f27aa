use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::Event;

pub struct EventRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts the event. The unique index on `slug` is the authority on
    /// conflicts, so two racing writers with the same title cannot both win.
    pub async fn create(&self, event: &Event) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO evently_events (id, title, slug, description, overview, image, venue, location, date, time, mode, audience, agenda, organizer, tags, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.slug)
        .bind(&event.description)
        .bind(&event.overview)
        .bind(&event.image)
        .bind(&event.venue)
        .bind(&event.location)
        .bind(&event.date)
        .bind(&event.time)
        .bind(&event.mode)
        .bind(&event.audience)
        .bind(sqlx::types::Json(&event.agenda))
        .bind(&event.organizer)
        .bind(sqlx::types::Json(&event.tags))
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::SlugTaken(event.slug.clone())
            }
            other => StoreError::Database(other),
        })?;

        Ok(())
    }

    pub async fn update(&self, event: &Event) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE evently_events
             SET title = ?, slug = ?, description = ?, overview = ?, image = ?, venue = ?, location = ?, date = ?, time = ?, mode = ?, audience = ?, agenda = ?, organizer = ?, tags = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&event.title)
        .bind(&event.slug)
        .bind(&event.description)
        .bind(&event.overview)
        .bind(&event.image)
        .bind(&event.venue)
        .bind(&event.location)
        .bind(&event.date)
        .bind(&event.time)
        .bind(&event.mode)
        .bind(&event.audience)
        .bind(sqlx::types::Json(&event.agenda))
        .bind(&event.organizer)
        .bind(sqlx::types::Json(&event.tags))
        .bind(event.updated_at)
        .bind(event.id)
        .execute(self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::SlugTaken(event.slug.clone())
            }
            other => StoreError::Database(other),
        })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::EventNotFound(event.id));
        }

        Ok(())
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>, StoreError> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM evently_events WHERE slug = ?")
            .bind(slug)
            .fetch_optional(self.pool)
            .await?;

        Ok(event)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM evently_events WHERE id = ?)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    pub async fn list_all(&self) -> Result<Vec<Event>, StoreError> {
        let events =
            sqlx::query_as::<_, Event>("SELECT * FROM evently_events ORDER BY created_at DESC")
                .fetch_all(self.pool)
                .await?;

        Ok(events)
    }

    /// Events sharing at least one tag with `event`, excluding the event
    /// itself, newest first. An event without tags has no similar events.
    pub async fn find_similar(&self, event: &Event) -> Result<Vec<Event>, StoreError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT e.* FROM evently_events e
             WHERE e.id != ?
               AND EXISTS (
                 SELECT 1 FROM json_each(e.tags) t
                 WHERE t.value IN (SELECT value FROM json_each(?))
               )
             ORDER BY e.created_at DESC",
        )
        .bind(event.id)
        .bind(sqlx::types::Json(&event.tags))
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }
}
