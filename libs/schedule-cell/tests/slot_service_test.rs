use chrono::{NaiveDate, NaiveTime};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use schedule_cell::services::SlotService;
use shared_utils::test_utils::{MockRecordsResponses, TestConfig};

fn t(hours: u32, minutes: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hours, minutes, 0).unwrap()
}

#[tokio::test]
async fn derives_day_slots_with_bookings_applied() {
    let mock_server = MockServer::start().await;

    // 2024-03-07 is a Thursday (day_of_week 4).
    let mut schedule = MockRecordsResponses::schedule(11, 3, 4);
    schedule["end_time"] = serde_json::json!("11:00");

    Mock::given(method("GET"))
        .and(path("/api/v1/schedules"))
        .and(query_param("day_of_week", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![schedule]))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            MockRecordsResponses::appointment(
                7,
                "Maria Gomez",
                "2024-03-07T09:40:00Z",
                "2024-03-07T10:10:00Z",
            ),
        ]))
        .mount(&mock_server)
        .await;

    let config = TestConfig::default()
        .with_records_url(&mock_server.uri())
        .to_app_config();
    let service = SlotService::new(&config);

    let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    let response = service
        .slots_for_date(3, date, None)
        .await
        .expect("derivation should succeed");

    assert_eq!(response.doctor_id, 3);
    assert_eq!(response.date, date);
    assert_eq!(response.slots.len(), 4);

    let booked: Vec<_> = response
        .slots
        .iter()
        .filter(|s| s.appointment_id.is_some())
        .collect();
    assert_eq!(booked.len(), 1);
    assert_eq!(booked[0].start_time, t(9, 30));
    assert_eq!(booked[0].appointment_id, Some(7));
    assert!(!booked[0].is_available);

    assert!(response.slots.iter().all(|s| s.is_consistent()));
}

#[tokio::test]
async fn no_schedule_for_day_gives_empty_sequence() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/schedules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&mock_server)
        .await;

    let config = TestConfig::default()
        .with_records_url(&mock_server.uri())
        .to_app_config();
    let service = SlotService::new(&config);

    let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    let response = service
        .slots_for_date(3, date, None)
        .await
        .expect("derivation should succeed");

    assert!(response.slots.is_empty());
}
