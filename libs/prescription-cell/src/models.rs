use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared_models::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub medication: String,
    pub dosage: String,
    pub instructions: Option<String>,
    pub issued_on: NaiveDate,
    pub expires_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePrescriptionRequest {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub medication: String,
    pub dosage: String,
    pub instructions: Option<String>,
    pub expires_on: Option<NaiveDate>,
}

#[derive(Debug, thiserror::Error)]
pub enum PrescriptionError {
    #[error("Prescription not found")]
    NotFound,

    #[error("{0} must not be empty")]
    MissingField(&'static str),

    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl From<PrescriptionError> for AppError {
    fn from(err: PrescriptionError) -> Self {
        match err {
            PrescriptionError::NotFound => AppError::NotFound(err.to_string()),
            PrescriptionError::MissingField(_) => AppError::Validation(err.to_string()),
            PrescriptionError::Upstream(e) => AppError::Upstream(e.to_string()),
        }
    }
}
