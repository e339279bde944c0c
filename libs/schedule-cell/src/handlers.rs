use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{CreateScheduleRequest, SlotQuery, UpdateScheduleRequest};
use crate::services::{ScheduleService, SlotService};

fn require_admin(user: &User) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Auth("Administrative role required".to_string()))
    }
}

#[axum::debug_handler]
pub async fn list_schedules(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = ScheduleService::new(&state);

    let schedules = service.list_for_doctor(doctor_id, None).await?;

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "schedules": schedules
    })))
}

#[axum::debug_handler]
pub async fn get_day_slots(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<i64>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Value>, AppError> {
    let service = SlotService::new(&state);

    let response = service.slots_for_date(doctor_id, query.date, None).await?;

    Ok(Json(json!(response)))
}

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<i64>,
    Extension(user): Extension<User>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let service = ScheduleService::new(&state);
    let schedule = service.create(doctor_id, request, auth.token()).await?;

    Ok(Json(json!(schedule)))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<AppConfig>>,
    Path(schedule_id): Path<i64>,
    Extension(user): Extension<User>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<UpdateScheduleRequest>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let service = ScheduleService::new(&state);
    let schedule = service.update(schedule_id, request, auth.token()).await?;

    Ok(Json(json!(schedule)))
}

#[axum::debug_handler]
pub async fn delete_schedule(
    State(state): State<Arc<AppConfig>>,
    Path(schedule_id): Path<i64>,
    Extension(user): Extension<User>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let service = ScheduleService::new(&state);
    service.delete(schedule_id, auth.token()).await?;

    Ok(Json(json!({ "deleted": schedule_id })))
}
