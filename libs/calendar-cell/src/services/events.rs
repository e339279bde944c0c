use chrono::{Duration, NaiveTime, SecondsFormat};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_database::RecordsClient;
use shared_utils::display::format_time;

use crate::models::{
    AppointmentRecord, CalendarError, CalendarEvent, ConsultationDetails, CreateEventRequest,
    EventDetails, EventMetadata, EventRangeQuery, EventStatus, EventView, IntakeDetails,
    UpdateEventRequest,
};

/// Turn a records-service appointment row into the calendar widget's
/// event shape, attaching the detail block the requested view needs.
pub fn event_from_record(
    record: AppointmentRecord,
    view: Option<EventView>,
) -> Result<CalendarEvent, CalendarError> {
    let status = EventStatus::from_record_status(&record.status)?;

    let metadata = view.map(|view| match view {
        EventView::Intake => EventMetadata::Intake(IntakeDetails {
            patient_id: record.patient_id,
            insurance_id: record.insurance_id.clone(),
            phone: record.phone.clone(),
            age: record.age,
        }),
        EventView::Consultation => EventMetadata::Consultation(ConsultationDetails {
            doctor_id: record.doctor_id,
            doctor_name: record.doctor_name.clone(),
            department_id: record.department_id,
            department_name: record.department_name.clone(),
            symptoms: record.symptoms.clone(),
            event_time: format_time(&record.start_time.time().format("%H:%M:%S").to_string()),
        }),
    });

    Ok(CalendarEvent {
        id: record.id.to_string(),
        title: record.patient_name.clone(),
        start: record.start_time,
        end: record.end_time,
        extended_props: EventDetails {
            calendar: status,
            patient_name: record.patient_name,
            metadata,
        },
    })
}

pub struct EventService {
    records: RecordsClient,
}

impl EventService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            records: RecordsClient::new(config),
        }
    }

    /// Calendar feed for a date range. Rows whose status has no calendar
    /// band are skipped with a warning rather than poisoning the feed.
    pub async fn feed(
        &self,
        query: EventRangeQuery,
        auth_token: &str,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        if query.from > query.to {
            return Err(CalendarError::InvalidRange);
        }

        debug!("Fetching calendar events from {} to {}", query.from, query.to);

        let from = query.from.and_time(NaiveTime::MIN).and_utc();
        let to = query.to.and_time(NaiveTime::MIN).and_utc() + Duration::days(1);

        let mut path = format!(
            "/api/v1/appointments?from={}&to={}",
            from.to_rfc3339_opts(SecondsFormat::Secs, true),
            to.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
        if let Some(doctor_id) = query.doctor_id {
            path.push_str(&format!("&doctor_id={}", doctor_id));
        }

        let records: Vec<AppointmentRecord> = self
            .records
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        let mut events = Vec::with_capacity(records.len());
        for record in records {
            let id = record.id;
            match event_from_record(record, query.view) {
                Ok(event) => events.push(event),
                Err(e) => warn!("Skipping appointment {} in calendar feed: {}", id, e),
            }
        }

        events.sort_by_key(|e| e.start);
        Ok(events)
    }

    /// Book a new appointment. The records service owns conflict
    /// detection; this layer only validates the interval shape.
    pub async fn create(
        &self,
        request: CreateEventRequest,
        auth_token: &str,
    ) -> Result<CalendarEvent, CalendarError> {
        if request.start_time >= request.end_time {
            return Err(CalendarError::InvalidTimeRange);
        }

        debug!(
            "Booking appointment for patient {} with doctor {}",
            request.patient_id, request.doctor_id
        );

        let body = json!({
            "patient_id": request.patient_id,
            "doctor_id": request.doctor_id,
            "department_id": request.department_id,
            "start_time": request.start_time.to_rfc3339_opts(SecondsFormat::Secs, true),
            "end_time": request.end_time.to_rfc3339_opts(SecondsFormat::Secs, true),
            "symptoms": request.symptoms,
            "status": "pending",
        });

        let record: AppointmentRecord = self
            .records
            .request(Method::POST, "/api/v1/appointments", Some(auth_token), Some(body))
            .await?;

        event_from_record(record, None)
    }

    /// Reschedule or annotate an appointment.
    pub async fn update(
        &self,
        event_id: i64,
        request: UpdateEventRequest,
        auth_token: &str,
    ) -> Result<CalendarEvent, CalendarError> {
        if let (Some(start), Some(end)) = (request.start_time, request.end_time) {
            if start >= end {
                return Err(CalendarError::InvalidTimeRange);
            }
        }

        debug!("Updating appointment: {}", event_id);

        let mut body = serde_json::Map::new();
        if let Some(start) = request.start_time {
            body.insert(
                "start_time".to_string(),
                json!(start.to_rfc3339_opts(SecondsFormat::Secs, true)),
            );
        }
        if let Some(end) = request.end_time {
            body.insert(
                "end_time".to_string(),
                json!(end.to_rfc3339_opts(SecondsFormat::Secs, true)),
            );
        }
        if let Some(symptoms) = request.symptoms {
            body.insert("symptoms".to_string(), json!(symptoms));
        }

        let path = format!("/api/v1/appointments/{}", event_id);
        let record: AppointmentRecord = self
            .records
            .request(
                Method::PATCH,
                &path,
                Some(auth_token),
                Some(serde_json::Value::Object(body)),
            )
            .await
            .map_err(|_| CalendarError::NotFound)?;

        event_from_record(record, None)
    }

    /// Cancel an appointment. A status mutation upstream, not a deletion;
    /// the row keeps its history and the slot derivation frees the
    /// interval.
    pub async fn cancel(&self, event_id: i64, auth_token: &str) -> Result<(), CalendarError> {
        debug!("Cancelling appointment: {}", event_id);

        let path = format!("/api/v1/appointments/{}", event_id);
        self.records
            .send(
                Method::PATCH,
                &path,
                Some(auth_token),
                Some(json!({ "status": "cancelled" })),
            )
            .await
            .map_err(|_| CalendarError::NotFound)?;

        Ok(())
    }
}
