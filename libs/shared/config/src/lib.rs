use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub records_url: String,
    pub records_api_key: String,
    pub jwt_secret: String,
    pub slot_granularity_minutes: i64,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            records_url: env::var("RECORDS_SERVICE_URL")
                .unwrap_or_else(|_| {
                    warn!("RECORDS_SERVICE_URL not set, using empty value");
                    String::new()
                }),
            records_api_key: env::var("RECORDS_SERVICE_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("RECORDS_SERVICE_API_KEY not set, using empty value");
                    String::new()
                }),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("JWT_SECRET not set, using empty value");
                    String::new()
                }),
            slot_granularity_minutes: env::var("SLOT_GRANULARITY_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| {
                    warn!("SLOT_GRANULARITY_MINUTES not set, using default of 30");
                    30
                }),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.records_url.is_empty()
            && !self.records_api_key.is_empty()
            && !self.jwt_secret.is_empty()
    }
}
