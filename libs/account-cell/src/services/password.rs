use anyhow::Context;
use reqwest::Method;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::RecordsClient;

use crate::models::{
    AccountError, ChangePasswordRequest, PasswordChangePayload, MIN_PASSWORD_LENGTH,
};

/// Check the form synchronously, before anything leaves this process.
/// A failure here must not produce any upstream traffic.
pub fn validate_change(request: &ChangePasswordRequest) -> Result<(), AccountError> {
    if request.new_password != request.confirm_password {
        return Err(AccountError::ConfirmationMismatch);
    }
    if request.new_password.len() < MIN_PASSWORD_LENGTH {
        return Err(AccountError::PasswordTooShort);
    }
    if request.new_password == request.current_password {
        return Err(AccountError::PasswordUnchanged);
    }
    Ok(())
}

pub struct PasswordService {
    records: RecordsClient,
}

impl PasswordService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            records: RecordsClient::new(config),
        }
    }

    /// Validate locally, then forward the change to the records service.
    /// Rejections come back as-is; there is no retry.
    pub async fn change_password(
        &self,
        request: ChangePasswordRequest,
        auth_token: &str,
    ) -> Result<(), AccountError> {
        validate_change(&request)?;

        debug!("Forwarding password change to records service");

        let payload = PasswordChangePayload {
            current_password: request.current_password,
            new_password: request.new_password,
        };
        let body = serde_json::to_value(&payload).context("serializing password payload")?;

        self.records
            .send(Method::POST, "/api/v1/accounts/password", Some(auth_token), Some(body))
            .await?;

        Ok(())
    }
}
