use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use shared_models::error::AppError;

/// Wire codec for clinic wall-clock times. The records service stores
/// `"HH:MM"`; `"HH:MM:SS"` is accepted on input for older rows.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse(&value).map_err(serde::de::Error::custom)
    }

    pub fn parse(value: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(value, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
    }
}

mod hhmm_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_str(&t.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        value
            .map(|v| super::hhmm::parse(&v).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// One doctor's recurring weekly availability window.
///
/// Windows are owned by the records service; this layer validates and
/// derives from them but never persists them itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    pub doctor_id: i64,
    /// 0 = Sunday, 1 = Monday, etc.
    pub day_of_week: i32,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub is_active: bool,
}

impl Schedule {
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        start < self.end_time && end > self.start_time
    }
}

/// One concrete bookable interval derived from a Schedule for a specific
/// date. A slot bound to an appointment is never available; the only
/// constructors uphold that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub appointment_id: Option<i64>,
}

impl TimeSlot {
    pub fn open(start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            start_time,
            end_time,
            is_available: true,
            appointment_id: None,
        }
    }

    pub fn booked(start_time: NaiveTime, end_time: NaiveTime, appointment_id: i64) -> Self {
        Self {
            start_time,
            end_time,
            is_available: false,
            appointment_id: Some(appointment_id),
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.appointment_id.is_none() || !self.is_available
    }
}

/// Booking row as the records service reports it, reduced to what slot
/// derivation needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookedAppointment {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
}

impl BookedAppointment {
    /// Cancelled and missed bookings release their interval.
    pub fn blocks_slot(&self) -> bool {
        matches!(self.status.as_str(), "pending" | "confirmed" | "in_progress")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub day_of_week: i32,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateScheduleRequest {
    #[serde(default, with = "hhmm_opt")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm_opt")]
    pub end_time: Option<NaiveTime>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySlotsResponse {
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Start time must be before end time")]
    InvalidTimeRange,

    #[error("Day of week must be between 0 (Sunday) and 6 (Saturday)")]
    InvalidDayOfWeek,

    #[error("Schedule overlaps an existing window for this doctor")]
    WindowOverlap,

    #[error("Schedule not found")]
    NotFound,

    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::InvalidTimeRange | ScheduleError::InvalidDayOfWeek => {
                AppError::Validation(err.to_string())
            }
            ScheduleError::WindowOverlap => AppError::Conflict(err.to_string()),
            ScheduleError::NotFound => AppError::NotFound(err.to_string()),
            ScheduleError::Upstream(e) => AppError::Upstream(e.to_string()),
        }
    }
}
