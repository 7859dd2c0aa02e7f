//! Password policy for registration and admin-initiated resets.

use thiserror::Error;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A single violated password rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    /// Shorter than [`MIN_PASSWORD_LENGTH`].
    TooShort,
    /// No ASCII uppercase letter.
    MissingUppercase,
    /// No ASCII digit.
    MissingDigit,
    /// Confirmation field differs from the password.
    ConfirmationMismatch,
}

impl std::fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooShort => {
                write!(f, "must be at least {MIN_PASSWORD_LENGTH} characters")
            }
            Self::MissingUppercase => write!(f, "must contain an uppercase letter"),
            Self::MissingDigit => write!(f, "must contain a digit"),
            Self::ConfirmationMismatch => write!(f, "confirmation does not match"),
        }
    }
}

/// Rejection carrying every violated rule at once, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("password rejected: {}", format_violations(violations))]
pub struct PasswordPolicyError {
    /// All violated rules, in check order.
    pub violations: Vec<PasswordRule>,
}

fn format_violations(violations: &[PasswordRule]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a candidate password and its confirmation.
///
/// Accepted only if the password is at least [`MIN_PASSWORD_LENGTH`] bytes,
/// contains at least one ASCII uppercase letter and at least one ASCII digit,
/// and the confirmation is byte-equal. There is no symbol requirement and no
/// maximum length.
///
/// # Errors
///
/// Returns a [`PasswordPolicyError`] listing every violated rule.
pub fn validate_password(password: &str, confirmation: &str) -> Result<(), PasswordPolicyError> {
    let mut violations = Vec::new();

    if password.len() < MIN_PASSWORD_LENGTH {
        violations.push(PasswordRule::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(PasswordRule::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push(PasswordRule::MissingDigit);
    }
    if password != confirmation {
        violations.push(PasswordRule::ConfirmationMismatch);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(PasswordPolicyError { violations })
    }
}
