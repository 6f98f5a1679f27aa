pub mod booking;
pub mod event;

pub use booking::{Booking, CreateBooking};
pub use event::{CreateEvent, Event, UpdateEvent};
