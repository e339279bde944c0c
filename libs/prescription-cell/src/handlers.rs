use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::CreatePrescriptionRequest;
use crate::services::PrescriptionService;

#[axum::debug_handler]
pub async fn list_patient_prescriptions(
    State(state): State<Arc<AppConfig>>,
    Path(patient_id): Path<i64>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = PrescriptionService::new(&state);

    let prescriptions = service.list_for_patient(patient_id, auth.token()).await?;

    Ok(Json(json!({
        "patient_id": patient_id,
        "prescriptions": prescriptions
    })))
}

#[axum::debug_handler]
pub async fn get_prescription(
    State(state): State<Arc<AppConfig>>,
    Path(prescription_id): Path<i64>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = PrescriptionService::new(&state);

    let prescription = service.get(prescription_id, auth.token()).await?;

    Ok(Json(json!(prescription)))
}

#[axum::debug_handler]
pub async fn create_prescription(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<CreatePrescriptionRequest>,
) -> Result<Json<Value>, AppError> {
    if !user.is_doctor() && !user.is_admin() {
        return Err(AppError::Auth("Doctor role required".to_string()));
    }

    let service = PrescriptionService::new(&state);
    let prescription = service.create(request, auth.token()).await?;

    Ok(Json(json!(prescription)))
}
