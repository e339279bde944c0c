use assert_matches::assert_matches;
use serde_json::json;

use calendar_cell::models::{
    CalendarError, CalendarEvent, ConsultationDetails, EventDetails, EventMetadata, EventStatus,
};

#[test]
fn status_accepts_only_the_four_bands() {
    for (value, expected) in [
        ("success", EventStatus::Success),
        ("danger", EventStatus::Danger),
        ("warning", EventStatus::Warning),
        ("waiting", EventStatus::Waiting),
    ] {
        let parsed: EventStatus = serde_json::from_value(json!(value)).unwrap();
        assert_eq!(parsed, expected);
    }

    assert!(serde_json::from_value::<EventStatus>(json!("primary")).is_err());
    assert!(serde_json::from_value::<EventStatus>(json!("Success")).is_err());
    assert!(serde_json::from_value::<EventStatus>(json!("")).is_err());
}

#[test]
fn status_resolves_variant_class_through_lookup_table() {
    assert_eq!(EventStatus::Success.css_class(), "fc-bg-success");
    assert_eq!(EventStatus::Danger.css_class(), "fc-bg-danger");
    assert_eq!(EventStatus::Warning.css_class(), "fc-bg-warning");
    assert_eq!(EventStatus::Waiting.css_class(), "fc-bg-waiting");
}

#[test]
fn record_statuses_map_onto_bands() {
    assert_eq!(
        EventStatus::from_record_status("confirmed").unwrap(),
        EventStatus::Success
    );
    assert_eq!(
        EventStatus::from_record_status("pending").unwrap(),
        EventStatus::Waiting
    );
    assert_eq!(
        EventStatus::from_record_status("no_show").unwrap(),
        EventStatus::Warning
    );
    assert_eq!(
        EventStatus::from_record_status("cancelled").unwrap(),
        EventStatus::Danger
    );

    assert_matches!(
        EventStatus::from_record_status("triaged"),
        Err(CalendarError::UnsupportedStatus(s)) if s == "triaged"
    );
}

#[test]
fn event_serializes_under_extended_props() {
    let event = CalendarEvent {
        id: "42".to_string(),
        title: "Maria Gomez".to_string(),
        start: "2024-03-07T09:30:00Z".parse().unwrap(),
        end: "2024-03-07T10:00:00Z".parse().unwrap(),
        extended_props: EventDetails {
            calendar: EventStatus::Success,
            patient_name: "Maria Gomez".to_string(),
            metadata: None,
        },
    };

    let value = serde_json::to_value(&event).unwrap();

    assert_eq!(value["extendedProps"]["calendar"], json!("success"));
    assert_eq!(value["extendedProps"]["patientName"], json!("Maria Gomez"));
    assert!(value["extendedProps"].get("metadata").is_none());
}

#[test]
fn metadata_variants_are_tagged_by_kind() {
    let metadata = EventMetadata::Consultation(ConsultationDetails {
        doctor_id: 3,
        doctor_name: "Dr. Imran Ahmed".to_string(),
        department_id: Some(2),
        department_name: Some("Cardiology".to_string()),
        symptoms: None,
        event_time: "09:30".to_string(),
    });

    let value = serde_json::to_value(&metadata).unwrap();

    assert_eq!(value["kind"], json!("consultation"));
    assert_eq!(value["doctorName"], json!("Dr. Imran Ahmed"));
    assert_eq!(value["eventTime"], json!("09:30"));
}
