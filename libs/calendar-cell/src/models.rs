use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use shared_models::error::AppError;

// ==============================================================================
// CALENDAR EVENT MODELS
// ==============================================================================

/// Severity band a calendar entry renders with. The set is closed: any
/// other value on the wire is a contract violation and fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Success,
    Danger,
    Warning,
    Waiting,
}

impl EventStatus {
    /// Design-system variant class, resolved through a closed lookup
    /// table instead of caller-supplied render fragments.
    pub fn css_class(&self) -> &'static str {
        match self {
            EventStatus::Success => "fc-bg-success",
            EventStatus::Danger => "fc-bg-danger",
            EventStatus::Warning => "fc-bg-warning",
            EventStatus::Waiting => "fc-bg-waiting",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Success => "success",
            EventStatus::Danger => "danger",
            EventStatus::Warning => "warning",
            EventStatus::Waiting => "waiting",
        }
    }

    /// Map a records-service appointment status onto a calendar band.
    pub fn from_record_status(status: &str) -> Result<Self, CalendarError> {
        match status {
            "confirmed" | "in_progress" | "completed" => Ok(EventStatus::Success),
            "pending" => Ok(EventStatus::Waiting),
            "no_show" => Ok(EventStatus::Warning),
            "cancelled" => Ok(EventStatus::Danger),
            other => Err(CalendarError::UnsupportedStatus(other.to_string())),
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which detail block a feed consumer wants attached to each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventView {
    Intake,
    Consultation,
}

/// Registration-desk details: who the patient is and how to reach them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeDetails {
    pub patient_id: i64,
    pub insurance_id: Option<String>,
    pub phone: Option<String>,
    pub age: Option<i32>,
}

/// Clinical-side details: who sees the patient, where, and why.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationDetails {
    pub doctor_id: i64,
    pub doctor_name: String,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub symptoms: Option<String>,
    pub event_time: String,
}

/// Optional event metadata, one variant per consuming view. Consumers of
/// a variant get its guaranteed fields without sifting a bag of nullable
/// properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EventMetadata {
    Intake(IntakeDetails),
    Consultation(ConsultationDetails),
}

/// The block the calendar widget reads from `extendedProps`. Status and
/// patient name are always present; everything else rides in `metadata`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    pub calendar: EventStatus,
    pub patient_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EventMetadata>,
}

/// A scheduled appointment as the calendar widget consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "extendedProps")]
    pub extended_props: EventDetails,
}

// ==============================================================================
// RECORDS SERVICE ROWS AND REQUESTS
// ==============================================================================

/// Appointment row as the records service returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: i64,
    pub patient_id: i64,
    pub patient_name: String,
    pub doctor_id: i64,
    pub doctor_name: String,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub insurance_id: Option<String>,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub symptoms: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRangeQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub doctor_id: Option<i64>,
    pub view: Option<EventView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub department_id: Option<i64>,
    pub symptoms: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub symptoms: Option<String>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("Event not found")]
    NotFound,

    #[error("Range start must not be after range end")]
    InvalidRange,

    #[error("Start time must be before end time")]
    InvalidTimeRange,

    #[error("Records service reported unsupported appointment status: {0}")]
    UnsupportedStatus(String),

    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::NotFound => AppError::NotFound(err.to_string()),
            CalendarError::InvalidRange | CalendarError::InvalidTimeRange => {
                AppError::Validation(err.to_string())
            }
            CalendarError::UnsupportedStatus(_) => AppError::Upstream(err.to_string()),
            CalendarError::Upstream(e) => AppError::Upstream(e.to_string()),
        }
    }
}
