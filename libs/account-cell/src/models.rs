use serde::{Deserialize, Serialize};

use shared_models::error::AppError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Password-change form as the settings page submits it.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Wire payload the records service expects for a password change.
/// Hashing happens there, never in this layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangePayload {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("New password and confirmation do not match")]
    ConfirmationMismatch,

    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,

    #[error("New password must differ from the current password")]
    PasswordUnchanged,

    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::ConfirmationMismatch
            | AccountError::PasswordTooShort
            | AccountError::PasswordUnchanged => AppError::Validation(err.to_string()),
            AccountError::Upstream(e) => AppError::Upstream(e.to_string()),
        }
    }
}
