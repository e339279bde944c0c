use assert_matches::assert_matches;
use chrono::NaiveDate;
use wiremock::matchers::{any, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use calendar_cell::models::{CalendarError, EventMetadata, EventRangeQuery, EventStatus, EventView};
use calendar_cell::services::EventService;
use shared_utils::test_utils::{MockRecordsResponses, TestConfig};

fn service_against(mock_server: &MockServer) -> EventService {
    let config = TestConfig::default()
        .with_records_url(&mock_server.uri())
        .to_app_config();
    EventService::new(&config)
}

fn range(from: (i32, u32, u32), to: (i32, u32, u32), view: Option<EventView>) -> EventRangeQuery {
    EventRangeQuery {
        from: NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap(),
        to: NaiveDate::from_ymd_opt(to.0, to.1, to.2).unwrap(),
        doctor_id: None,
        view,
    }
}

#[tokio::test]
async fn feed_maps_appointments_into_events() {
    let mock_server = MockServer::start().await;

    let confirmed = MockRecordsResponses::appointment(
        7,
        "Maria Gomez",
        "2024-03-07T09:30:00Z",
        "2024-03-07T10:00:00Z",
    );
    let mut pending = MockRecordsResponses::appointment(
        8,
        "Jon Snow",
        "2024-03-07T08:00:00Z",
        "2024-03-07T08:30:00Z",
    );
    pending["status"] = serde_json::json!("pending");

    Mock::given(method("GET"))
        .and(path("/api/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![confirmed, pending]))
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server);
    let events = service
        .feed(range((2024, 3, 1), (2024, 3, 31), None), "token")
        .await
        .expect("feed should succeed");

    assert_eq!(events.len(), 2);
    // Sorted by start time.
    assert_eq!(events[0].id, "8");
    assert_eq!(events[0].extended_props.calendar, EventStatus::Waiting);
    assert_eq!(events[1].id, "7");
    assert_eq!(events[1].title, "Maria Gomez");
    assert_eq!(events[1].extended_props.calendar, EventStatus::Success);
    assert!(events[1].extended_props.metadata.is_none());
}

#[tokio::test]
async fn feed_attaches_requested_view_metadata() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            MockRecordsResponses::appointment(
                7,
                "Maria Gomez",
                "2024-03-07T09:30:00Z",
                "2024-03-07T10:00:00Z",
            ),
        ]))
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server);
    let events = service
        .feed(
            range((2024, 3, 1), (2024, 3, 31), Some(EventView::Consultation)),
            "token",
        )
        .await
        .expect("feed should succeed");

    let metadata = events[0].extended_props.metadata.as_ref().unwrap();
    match metadata {
        EventMetadata::Consultation(details) => {
            assert_eq!(details.doctor_name, "Dr. Imran Ahmed");
            assert_eq!(details.event_time, "09:30");
        }
        other => panic!("expected consultation metadata, got {:?}", other),
    }
}

#[tokio::test]
async fn feed_skips_rows_with_unsupported_status() {
    let mock_server = MockServer::start().await;

    let mut odd = MockRecordsResponses::appointment(
        9,
        "Arya Stark",
        "2024-03-07T11:00:00Z",
        "2024-03-07T11:30:00Z",
    );
    odd["status"] = serde_json::json!("triaged");

    Mock::given(method("GET"))
        .and(path("/api/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            odd,
            MockRecordsResponses::appointment(
                7,
                "Maria Gomez",
                "2024-03-07T09:30:00Z",
                "2024-03-07T10:00:00Z",
            ),
        ]))
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server);
    let events = service
        .feed(range((2024, 3, 1), (2024, 3, 31), None), "token")
        .await
        .expect("feed should succeed");

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, "7");
}

#[tokio::test]
async fn feed_rejects_inverted_range_without_upstream_call() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server);
    let result = service
        .feed(range((2024, 3, 31), (2024, 3, 1), None), "token")
        .await;

    assert_matches!(result, Err(CalendarError::InvalidRange));
}

#[tokio::test]
async fn cancel_issues_status_mutation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/appointments/7"))
        .and(body_partial_json(serde_json::json!({ "status": "cancelled" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server);
    service.cancel(7, "token").await.expect("cancel should succeed");
}
