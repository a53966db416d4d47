//! Registration and login input validation.
//!
//! Account storage itself lives in the hosted account service; this module
//! only validates what the forms send before the store is called.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationErrors};

use crate::validation::field_error;

/// Registration form input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub policy: bool,
}

impl Validate for RegisterInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if !self.email.validate_email() {
            errors.add("email", field_error("email", "Invalid email address"));
        }

        if self.password.chars().count() < 8 {
            errors.add(
                "password",
                field_error("min", "Password must be at least 8 characters"),
            );
        }
        if !self.password.chars().any(|c| c.is_ascii_uppercase()) {
            errors.add(
                "password",
                field_error(
                    "uppercase",
                    "Password must contain at least one uppercase letter",
                ),
            );
        }
        if !self.password.chars().any(|c| c.is_ascii_lowercase()) {
            errors.add(
                "password",
                field_error(
                    "lowercase",
                    "Password must contain at least one lowercase letter",
                ),
            );
        }
        if !self.password.chars().any(|c| c.is_ascii_digit()) {
            errors.add(
                "password",
                field_error("digit", "Password must contain at least one number"),
            );
        }

        if self.confirm_password != self.password {
            errors.add(
                "confirmPassword",
                field_error("mismatch", "Passwords do not match"),
            );
        }
        if !self.policy {
            errors.add(
                "policy",
                field_error("required", "You must accept the terms and conditions"),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl RegisterInput {
    /// Display name derived from the email local part.
    pub fn derived_name(&self) -> &str {
        self.email
            .trim()
            .split('@')
            .next()
            .unwrap_or_default()
    }
}

/// Login form input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl Validate for LoginInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if !self.email.validate_email() {
            errors.add("email", field_error("email", "Invalid email address"));
        }
        if self.password.is_empty() {
            errors.add("password", field_error("required", "Password is required"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
