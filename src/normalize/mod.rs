pub mod datetime;
pub mod fields;
pub mod slug;

pub use datetime::{normalize_date, normalize_time};
pub use fields::{require_non_empty, require_non_empty_items, validate_email};
pub use slug::{generate_slug, is_valid_slug};
