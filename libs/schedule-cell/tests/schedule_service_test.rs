use assert_matches::assert_matches;
use chrono::NaiveTime;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use schedule_cell::models::{CreateScheduleRequest, ScheduleError};
use schedule_cell::services::ScheduleService;
use shared_utils::test_utils::{MockRecordsResponses, TestConfig};

fn t(hours: u32, minutes: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hours, minutes, 0).unwrap()
}

fn create_request(day: i32, start: NaiveTime, end: NaiveTime) -> CreateScheduleRequest {
    CreateScheduleRequest {
        day_of_week: day,
        start_time: start,
        end_time: end,
        is_active: None,
    }
}

async fn service_against(mock_server: &MockServer) -> ScheduleService {
    let config = TestConfig::default()
        .with_records_url(&mock_server.uri())
        .to_app_config();
    ScheduleService::new(&config)
}

#[tokio::test]
async fn create_rejects_inverted_window_without_upstream_call() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server).await;
    let result = service
        .create(3, create_request(1, t(17, 0), t(9, 0)), "token")
        .await;

    assert_matches!(result, Err(ScheduleError::InvalidTimeRange));
}

#[tokio::test]
async fn create_rejects_day_of_week_out_of_range() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server).await;

    let too_high = service
        .create(3, create_request(7, t(9, 0), t(12, 0)), "token")
        .await;
    assert_matches!(too_high, Err(ScheduleError::InvalidDayOfWeek));

    let negative = service
        .create(3, create_request(-1, t(9, 0), t(12, 0)), "token")
        .await;
    assert_matches!(negative, Err(ScheduleError::InvalidDayOfWeek));
}

#[tokio::test]
async fn create_rejects_overlapping_window() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/schedules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            MockRecordsResponses::schedule(11, 3, 1),
        ]))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/schedules"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server).await;

    // Existing window is 09:00-12:00; 11:00-13:00 overlaps it.
    let result = service
        .create(3, create_request(1, t(11, 0), t(13, 0)), "token")
        .await;

    assert_matches!(result, Err(ScheduleError::WindowOverlap));
}

#[tokio::test]
async fn create_posts_valid_window() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/schedules"))
        .and(query_param("doctor_id", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/schedules"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(MockRecordsResponses::schedule(21, 3, 1)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server).await;

    let schedule = service
        .create(3, create_request(1, t(9, 0), t(12, 0)), "token")
        .await
        .expect("create should succeed");

    assert_eq!(schedule.id, 21);
    assert_eq!(schedule.doctor_id, 3);
    assert_eq!(schedule.start_time, t(9, 0));
    assert!(schedule.is_active);
}

#[tokio::test]
async fn list_orders_windows_by_day_and_start() {
    let mock_server = MockServer::start().await;

    let mut friday = MockRecordsResponses::schedule(31, 3, 5);
    friday["start_time"] = serde_json::json!("14:00");
    friday["end_time"] = serde_json::json!("17:00");

    Mock::given(method("GET"))
        .and(path("/api/v1/schedules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            friday,
            MockRecordsResponses::schedule(32, 3, 1),
        ]))
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server).await;
    let schedules = service.list_for_doctor(3, None).await.expect("list should succeed");

    assert_eq!(schedules.len(), 2);
    assert_eq!(schedules[0].day_of_week, 1);
    assert_eq!(schedules[1].day_of_week, 5);
}
