use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::normalize::{
    generate_slug, normalize_date, normalize_time, require_non_empty, require_non_empty_items,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,

    pub title: String,
    pub slug: String,

    pub description: String,
    pub overview: String,
    pub image: String,

    pub venue: String,
    pub location: String,

    pub date: String,
    pub time: String,

    pub mode: String,
    pub audience: String,

    #[sqlx(json)]
    pub agenda: Vec<String>,

    pub organizer: String,

    #[sqlx(json)]
    pub tags: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub description: String,
    pub overview: String,
    pub image: String,
    pub venue: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub mode: String,
    pub audience: String,
    #[serde(default)]
    pub agenda: Vec<String>,
    pub organizer: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub overview: Option<String>,
    pub image: Option<String>,
    pub venue: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub mode: Option<String>,
    pub audience: Option<String>,
    pub agenda: Option<Vec<String>>,
    pub organizer: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Event {
    /// Runs the whole validation pipeline. Every plain string field is checked
    /// before the agenda and tags arrays, and the first failure wins; on
    /// success every stored field is in canonical form (trimmed strings,
    /// derived slug, `YYYY-MM-DD` date, 24-hour `HH:MM` time).
    pub fn new(create: CreateEvent) -> Result<Self, ValidationError> {
        let title = require_non_empty("title", &create.title)?;
        let description = require_non_empty("description", &create.description)?;
        let overview = require_non_empty("overview", &create.overview)?;
        let image = require_non_empty("image", &create.image)?;
        let venue = require_non_empty("venue", &create.venue)?;
        let location = require_non_empty("location", &create.location)?;
        let date = require_non_empty("date", &create.date)?;
        let time = require_non_empty("time", &create.time)?;
        let mode = require_non_empty("mode", &create.mode)?;
        let audience = require_non_empty("audience", &create.audience)?;
        let organizer = require_non_empty("organizer", &create.organizer)?;

        let agenda = require_non_empty_items("agenda", create.agenda)?;
        let tags = require_non_empty_items("tags", create.tags)?;

        let slug = generate_slug(&title);
        if slug.is_empty() {
            return Err(ValidationError::EmptySlug);
        }

        let date = normalize_date(&date)?;
        let time = normalize_time(&time)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            slug,
            description,
            overview,
            image,
            venue,
            location,
            date,
            time,
            mode,
            audience,
            agenda,
            organizer,
            tags,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies an explicit change-set. Absent fields are untouched; present
    /// fields go through the same checks as creation, with the slug re-derived
    /// whenever the title changes. A failed update leaves `self` partially
    /// modified, so callers must persist only on `Ok`.
    pub fn apply(&mut self, update: UpdateEvent) -> Result<(), ValidationError> {
        if let Some(title) = update.title {
            let title = require_non_empty("title", &title)?;
            let slug = generate_slug(&title);
            if slug.is_empty() {
                return Err(ValidationError::EmptySlug);
            }
            self.title = title;
            self.slug = slug;
        }
        if let Some(description) = update.description {
            self.description = require_non_empty("description", &description)?;
        }
        if let Some(overview) = update.overview {
            self.overview = require_non_empty("overview", &overview)?;
        }
        if let Some(image) = update.image {
            self.image = require_non_empty("image", &image)?;
        }
        if let Some(venue) = update.venue {
            self.venue = require_non_empty("venue", &venue)?;
        }
        if let Some(location) = update.location {
            self.location = require_non_empty("location", &location)?;
        }
        if let Some(date) = update.date {
            let date = require_non_empty("date", &date)?;
            self.date = normalize_date(&date)?;
        }
        if let Some(time) = update.time {
            let time = require_non_empty("time", &time)?;
            self.time = normalize_time(&time)?;
        }
        if let Some(mode) = update.mode {
            self.mode = require_non_empty("mode", &mode)?;
        }
        if let Some(audience) = update.audience {
            self.audience = require_non_empty("audience", &audience)?;
        }
        if let Some(agenda) = update.agenda {
            self.agenda = require_non_empty_items("agenda", agenda)?;
        }
        if let Some(organizer) = update.organizer {
            self.organizer = require_non_empty("organizer", &organizer)?;
        }
        if let Some(tags) = update.tags {
            self.tags = require_non_empty_items("tags", tags)?;
        }

        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_create() -> CreateEvent {
        CreateEvent {
            title: "Tech Conference 2026".to_string(),
            description: "Two days of talks".to_string(),
            overview: "  The flagship community event  ".to_string(),
            image: "/images/tech-conf.png".to_string(),
            venue: "Main Hall".to_string(),
            location: "Berlin".to_string(),
            date: "March 15, 2026".to_string(),
            time: "7pm".to_string(),
            mode: "offline".to_string(),
            audience: "developers".to_string(),
            agenda: vec!["Keynote".to_string(), " Lunch ".to_string()],
            organizer: "Rust Berlin".to_string(),
            tags: vec!["rust".to_string(), "conference".to_string()],
        }
    }

    #[test]
    fn test_event_creation_canonicalizes_fields() {
        let event = Event::new(sample_create()).unwrap();

        assert_eq!(event.title, "Tech Conference 2026");
        assert_eq!(event.slug, "tech-conference-2026");
        assert_eq!(event.overview, "The flagship community event");
        assert_eq!(event.date, "2026-03-15");
        assert_eq!(event.time, "19:00");
        assert_eq!(event.agenda, vec!["Keynote".to_string(), "Lunch".to_string()]);
        assert_eq!(event.created_at, event.updated_at);
    }

    #[test]
    fn test_event_requires_every_string_field() {
        let mut create = sample_create();
        create.organizer = "   ".to_string();

        assert_eq!(
            Event::new(create).unwrap_err(),
            ValidationError::EmptyField("organizer")
        );
    }

    #[test]
    fn test_first_failing_field_wins() {
        let mut create = sample_create();
        create.description = String::new();
        create.date = "not a date".to_string();

        // description is checked before date, so it is reported first.
        assert_eq!(
            Event::new(create).unwrap_err(),
            ValidationError::EmptyField("description")
        );
    }

    #[test]
    fn test_string_fields_are_checked_before_arrays() {
        let mut create = sample_create();
        create.agenda = vec!["  ".to_string()];
        create.organizer = "   ".to_string();

        // organizer is checked with the other string fields, before agenda.
        assert_eq!(
            Event::new(create).unwrap_err(),
            ValidationError::EmptyField("organizer")
        );
    }

    #[test]
    fn test_title_without_alphanumerics_is_rejected() {
        let mut create = sample_create();
        create.title = "!!! ???".to_string();

        assert_eq!(Event::new(create).unwrap_err(), ValidationError::EmptySlug);
    }

    #[test]
    fn test_blank_agenda_item_is_rejected_with_index() {
        let mut create = sample_create();
        create.agenda = vec!["Keynote".to_string(), "  ".to_string()];

        assert_eq!(
            Event::new(create).unwrap_err(),
            ValidationError::InvalidArrayElement {
                field: "agenda",
                index: 1
            }
        );
    }

    #[test]
    fn test_empty_arrays_are_valid() {
        let mut create = sample_create();
        create.agenda = vec![];
        create.tags = vec![];

        let event = Event::new(create).unwrap();
        assert!(event.agenda.is_empty());
        assert!(event.tags.is_empty());
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let mut create = sample_create();
        create.date = "2026-02-30".to_string();

        assert!(matches!(
            Event::new(create),
            Err(ValidationError::InvalidFormat { field: "date", .. })
        ));
    }

    #[test]
    fn test_apply_rederives_slug_with_title() {
        let mut event = Event::new(sample_create()).unwrap();

        event
            .apply(UpdateEvent {
                title: Some("Rust Meetup: Spring Edition!".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(event.title, "Rust Meetup: Spring Edition!");
        assert_eq!(event.slug, "rust-meetup-spring-edition");
        assert_eq!(event.venue, "Main Hall");
    }

    #[test]
    fn test_apply_leaves_slug_without_title() {
        let mut event = Event::new(sample_create()).unwrap();
        let slug_before = event.slug.clone();

        event
            .apply(UpdateEvent {
                venue: Some("Side Hall".to_string()),
                date: Some("04/01/2026".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(event.slug, slug_before);
        assert_eq!(event.venue, "Side Hall");
        assert_eq!(event.date, "2026-04-01");
    }

    #[test]
    fn test_apply_validates_supplied_fields() {
        let mut event = Event::new(sample_create()).unwrap();

        let result = event.apply(UpdateEvent {
            time: Some("25:00".to_string()),
            ..Default::default()
        });

        assert!(matches!(
            result,
            Err(ValidationError::InvalidValue { field: "time", .. })
        ));
    }

    #[test]
    fn test_apply_empty_changeset_touches_nothing_but_updated_at() {
        let mut event = Event::new(sample_create()).unwrap();
        let title_before = event.title.clone();
        let slug_before = event.slug.clone();

        event.apply(UpdateEvent::default()).unwrap();

        assert_eq!(event.title, title_before);
        assert_eq!(event.slug, slug_before);
        assert!(event.updated_at >= event.created_at);
    }
}
