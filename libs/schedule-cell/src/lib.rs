pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{BookedAppointment, Schedule, ScheduleError, TimeSlot};
pub use services::{ScheduleService, SlotService};
