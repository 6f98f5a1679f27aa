pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod normalize;
pub mod repositories;

pub use db::Database;
pub use error::{StoreError, ValidationError};
