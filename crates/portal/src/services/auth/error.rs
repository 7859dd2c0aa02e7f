//! Authentication service errors.

use thiserror::Error;

use kostpanel_core::PasswordPolicyError;

use crate::backend::BackendError;

/// Errors from the authentication flows.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username/password pair rejected by the backend.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A password failed the policy; carries every violated rule.
    #[error(transparent)]
    Policy(#[from] PasswordPolicyError),

    /// The backend call itself failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl AuthError {
    /// The message to surface in a page-level alert.
    #[must_use]
    pub fn alert_text(&self) -> String {
        match self {
            Self::InvalidCredentials => "Username atau password salah".to_owned(),
            Self::Policy(policy) => policy.to_string(),
            Self::Backend(backend) => backend.alert_text(),
        }
    }
}
