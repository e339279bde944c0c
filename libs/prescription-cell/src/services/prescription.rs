use reqwest::Method;
use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::RecordsClient;

use crate::models::{CreatePrescriptionRequest, Prescription, PrescriptionError};

pub struct PrescriptionService {
    records: RecordsClient,
}

impl PrescriptionService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            records: RecordsClient::new(config),
        }
    }

    pub async fn list_for_patient(
        &self,
        patient_id: i64,
        auth_token: &str,
    ) -> Result<Vec<Prescription>, PrescriptionError> {
        debug!("Fetching prescriptions for patient: {}", patient_id);

        let path = format!("/api/v1/prescriptions?patient_id={}", patient_id);
        let mut prescriptions: Vec<Prescription> = self
            .records
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        prescriptions.sort_by(|a, b| b.issued_on.cmp(&a.issued_on));
        Ok(prescriptions)
    }

    pub async fn get(
        &self,
        prescription_id: i64,
        auth_token: &str,
    ) -> Result<Prescription, PrescriptionError> {
        debug!("Fetching prescription: {}", prescription_id);

        let path = format!("/api/v1/prescriptions/{}", prescription_id);
        self.records
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(|_| PrescriptionError::NotFound)
    }

    /// Issue a prescription. The records service stamps the issue date.
    pub async fn create(
        &self,
        request: CreatePrescriptionRequest,
        auth_token: &str,
    ) -> Result<Prescription, PrescriptionError> {
        if request.medication.trim().is_empty() {
            return Err(PrescriptionError::MissingField("medication"));
        }
        if request.dosage.trim().is_empty() {
            return Err(PrescriptionError::MissingField("dosage"));
        }

        debug!(
            "Issuing prescription for patient {} by doctor {}",
            request.patient_id, request.doctor_id
        );

        let body = json!({
            "patient_id": request.patient_id,
            "doctor_id": request.doctor_id,
            "medication": request.medication,
            "dosage": request.dosage,
            "instructions": request.instructions,
            "expires_on": request.expires_on,
        });

        let prescription = self
            .records
            .request(Method::POST, "/api/v1/prescriptions", Some(auth_token), Some(body))
            .await?;

        Ok(prescription)
    }
}
