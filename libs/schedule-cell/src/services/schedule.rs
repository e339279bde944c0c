use chrono::NaiveTime;
use reqwest::Method;
use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::RecordsClient;

use crate::models::{CreateScheduleRequest, Schedule, ScheduleError, UpdateScheduleRequest};

pub struct ScheduleService {
    records: RecordsClient,
}

impl ScheduleService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            records: RecordsClient::new(config),
        }
    }

    /// List a doctor's availability windows, ordered by day and start time.
    pub async fn list_for_doctor(
        &self,
        doctor_id: i64,
        auth_token: Option<&str>,
    ) -> Result<Vec<Schedule>, ScheduleError> {
        debug!("Fetching schedules for doctor: {}", doctor_id);

        let path = format!("/api/v1/schedules?doctor_id={}", doctor_id);
        let mut schedules: Vec<Schedule> =
            self.records.request(Method::GET, &path, auth_token, None).await?;

        schedules.sort_by_key(|s| (s.day_of_week, s.start_time));
        Ok(schedules)
    }

    /// Create an availability window for a doctor.
    pub async fn create(
        &self,
        doctor_id: i64,
        request: CreateScheduleRequest,
        auth_token: &str,
    ) -> Result<Schedule, ScheduleError> {
        debug!("Creating schedule for doctor: {}", doctor_id);

        validate_window(request.day_of_week, request.start_time, request.end_time)?;

        self.check_window_conflicts(
            doctor_id,
            request.day_of_week,
            request.start_time,
            request.end_time,
            None,
            auth_token,
        )
        .await?;

        let body = json!({
            "doctor_id": doctor_id,
            "day_of_week": request.day_of_week,
            "start_time": request.start_time.format("%H:%M").to_string(),
            "end_time": request.end_time.format("%H:%M").to_string(),
            "is_active": request.is_active.unwrap_or(true),
        });

        let schedule: Schedule = self
            .records
            .request(Method::POST, "/api/v1/schedules", Some(auth_token), Some(body))
            .await?;

        debug!("Schedule created with ID: {}", schedule.id);
        Ok(schedule)
    }

    /// Update an availability window. Only provided fields change; the
    /// merged window is re-validated and re-checked for conflicts.
    pub async fn update(
        &self,
        schedule_id: i64,
        request: UpdateScheduleRequest,
        auth_token: &str,
    ) -> Result<Schedule, ScheduleError> {
        debug!("Updating schedule: {}", schedule_id);

        let existing = self.get_by_id(schedule_id, auth_token).await?;

        let start_time = request.start_time.unwrap_or(existing.start_time);
        let end_time = request.end_time.unwrap_or(existing.end_time);

        validate_window(existing.day_of_week, start_time, end_time)?;

        self.check_window_conflicts(
            existing.doctor_id,
            existing.day_of_week,
            start_time,
            end_time,
            Some(schedule_id),
            auth_token,
        )
        .await?;

        let mut body = serde_json::Map::new();
        if let Some(start) = request.start_time {
            body.insert("start_time".to_string(), json!(start.format("%H:%M").to_string()));
        }
        if let Some(end) = request.end_time {
            body.insert("end_time".to_string(), json!(end.format("%H:%M").to_string()));
        }
        if let Some(is_active) = request.is_active {
            body.insert("is_active".to_string(), json!(is_active));
        }

        let path = format!("/api/v1/schedules/{}", schedule_id);
        let schedule: Schedule = self
            .records
            .request(
                Method::PATCH,
                &path,
                Some(auth_token),
                Some(serde_json::Value::Object(body)),
            )
            .await?;

        Ok(schedule)
    }

    pub async fn delete(&self, schedule_id: i64, auth_token: &str) -> Result<(), ScheduleError> {
        debug!("Deleting schedule: {}", schedule_id);

        let path = format!("/api/v1/schedules/{}", schedule_id);
        self.records
            .send(Method::DELETE, &path, Some(auth_token), None)
            .await?;

        Ok(())
    }

    async fn get_by_id(
        &self,
        schedule_id: i64,
        auth_token: &str,
    ) -> Result<Schedule, ScheduleError> {
        let path = format!("/api/v1/schedules/{}", schedule_id);
        self.records
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(|_| ScheduleError::NotFound)
    }

    async fn check_window_conflicts(
        &self,
        doctor_id: i64,
        day_of_week: i32,
        start_time: NaiveTime,
        end_time: NaiveTime,
        exclude_id: Option<i64>,
        auth_token: &str,
    ) -> Result<(), ScheduleError> {
        let path = format!(
            "/api/v1/schedules?doctor_id={}&day_of_week={}",
            doctor_id, day_of_week
        );
        let existing: Vec<Schedule> = self
            .records
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        for window in existing {
            if exclude_id == Some(window.id) {
                continue;
            }
            if window.overlaps(start_time, end_time) {
                return Err(ScheduleError::WindowOverlap);
            }
        }

        Ok(())
    }
}

fn validate_window(
    day_of_week: i32,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<(), ScheduleError> {
    if start_time >= end_time {
        return Err(ScheduleError::InvalidTimeRange);
    }
    if !(0..=6).contains(&day_of_week) {
        return Err(ScheduleError::InvalidDayOfWeek);
    }
    Ok(())
}
