use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CreateEventRequest, EventRangeQuery, UpdateEventRequest};
use crate::services::EventService;

#[axum::debug_handler]
pub async fn get_events(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Query(query): Query<EventRangeQuery>,
) -> Result<Json<Value>, AppError> {
    let service = EventService::new(&state);

    let events = service.feed(query, auth.token()).await?;

    Ok(Json(json!({
        "events": events,
        "total": events.len()
    })))
}

#[axum::debug_handler]
pub async fn create_event(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<CreateEventRequest>,
) -> Result<Json<Value>, AppError> {
    let service = EventService::new(&state);

    let event = service.create(request, auth.token()).await?;

    Ok(Json(json!(event)))
}

#[axum::debug_handler]
pub async fn update_event(
    State(state): State<Arc<AppConfig>>,
    Path(event_id): Path<i64>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<Value>, AppError> {
    let service = EventService::new(&state);

    let event = service.update(event_id, request, auth.token()).await?;

    Ok(Json(json!(event)))
}

#[axum::debug_handler]
pub async fn cancel_event(
    State(state): State<Arc<AppConfig>>,
    Path(event_id): Path<i64>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = EventService::new(&state);

    service.cancel(event_id, auth.token()).await?;

    Ok(Json(json!({ "cancelled": event_id })))
}
