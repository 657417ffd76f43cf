//! Password policy enforcement for new accounts.

use luxedrive_core::config::auth::AuthConfig;
use luxedrive_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Checks a candidate password. `user_inputs` (email, names) count
    /// against the password's strength.
    ///
    /// Returns the first violation found.
    pub fn validate(&self, password: &str, user_inputs: &[&str]) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if password.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::validation("Password cannot be entirely numeric"));
        }

        let estimate = zxcvbn::zxcvbn(password, user_inputs);
        if estimate.score() < zxcvbn::Score::Two {
            return Err(AppError::validation(
                "Password is too common or too similar to your personal details",
            ));
        }

        Ok(())
    }
}
