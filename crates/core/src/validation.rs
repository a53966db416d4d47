//! Shared helpers for building field-keyed validation errors.
//!
//! Validators in this crate return [`validator::ValidationErrors`]: a map
//! from field name to the list of rule violations. Simple per-field rules
//! use the `validator` derive; cross-field rules are written by hand with
//! these helpers so the error lands on the field the UI should highlight.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

/// Build a single [`ValidationError`] with a static code and message.
pub fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// True when a string is empty after trimming.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check a trimmed string length against an inclusive range, adding an
/// error under `field` when it falls outside.
pub fn check_length(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
    message: &'static str,
) {
    let len = value.trim().chars().count();
    if len < min || len > max {
        errors.add(field, field_error("length", message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detects_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn check_length_bounds() {
        let mut errors = ValidationErrors::new();
        check_length(&mut errors, "name", "a", 2, 50, "too short");
        assert!(errors.errors().contains_key("name"));

        let mut ok = ValidationErrors::new();
        check_length(&mut ok, "name", "ab", 2, 50, "too short");
        assert!(ok.is_empty());
    }

    #[test]
    fn field_error_carries_message() {
        let err = field_error("required", "Country is required");
        assert_eq!(err.code, "required");
        assert_eq!(err.message.as_deref(), Some("Country is required"));
    }
}
