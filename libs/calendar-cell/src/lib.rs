pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{CalendarError, CalendarEvent, EventMetadata, EventStatus};
pub use services::EventService;
