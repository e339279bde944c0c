use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;

pub struct TestConfig {
    pub jwt_secret: String,
    pub records_url: String,
    pub records_api_key: String,
    pub slot_granularity_minutes: i64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            records_url: "http://localhost:4000".to_string(),
            records_api_key: "test-api-key".to_string(),
            slot_granularity_minutes: 30,
        }
    }
}

impl TestConfig {
    pub fn with_records_url(mut self, url: &str) -> Self {
        self.records_url = url.to_string();
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            records_url: self.records_url.clone(),
            records_api_key: self.records_api_key.clone(),
            jwt_secret: self.jwt_secret.clone(),
            slot_granularity_minutes: self.slot_granularity_minutes,
            port: 3000,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: "patient".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn doctor(email: &str) -> Self {
        Self::new(email, "doctor")
    }

    pub fn patient(email: &str) -> Self {
        Self::new(email, "patient")
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, "admin")
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: Some(self.email.clone()),
            role: Some(self.role.clone()),
            created_at: Some(Utc::now()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.id,
            "email": user.email,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

pub struct MockRecordsResponses;

impl MockRecordsResponses {
    pub fn account_profile(user_id: &str) -> serde_json::Value {
        json!({
            "id": user_id,
            "email": "test@example.com",
            "full_name": "Test User",
            "phone": null,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn schedule(id: i64, doctor_id: i64, day_of_week: i32) -> serde_json::Value {
        json!({
            "id": id,
            "doctor_id": doctor_id,
            "day_of_week": day_of_week,
            "start_time": "09:00",
            "end_time": "12:00",
            "is_active": true
        })
    }

    pub fn appointment(id: i64, patient_name: &str, start: &str, end: &str) -> serde_json::Value {
        json!({
            "id": id,
            "patient_id": 7,
            "patient_name": patient_name,
            "doctor_id": 3,
            "doctor_name": "Dr. Imran Ahmed",
            "department_id": 2,
            "department_name": "Cardiology",
            "start_time": start,
            "end_time": end,
            "status": "confirmed",
            "phone": "555-0104",
            "insurance_id": "INS-2210",
            "age": 41,
            "symptoms": "Chest pain"
        })
    }

    pub fn prescription(id: i64, patient_id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "patient_id": patient_id,
            "doctor_id": 3,
            "medication": "Amoxicillin",
            "dosage": "500mg",
            "instructions": "Three times daily after meals",
            "issued_on": "2024-03-07",
            "expires_on": "2024-04-07"
        })
    }

    pub fn error(message: &str) -> serde_json::Value {
        json!({
            "error": message
        })
    }
}
