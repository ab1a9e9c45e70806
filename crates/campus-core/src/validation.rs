//! Validation utilities.

use crate::{CrmError, FieldError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `CrmError` on failure.
    fn validate_request(&self) -> Result<(), CrmError> {
        self.validate().map_err(|e| validation_errors_to_crm_error(&e))
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator` output into per-field messages.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                FieldError::new(
                    field.to_string(),
                    error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string),
                )
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

/// Converts `validator::ValidationErrors` to `CrmError`.
#[must_use]
pub fn validation_errors_to_crm_error(errors: &ValidationErrors) -> CrmError {
    let message = field_errors(errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    CrmError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates a non-negative money amount with at most two decimals.
    pub fn decimal_amount(value: &str) -> Result<(), ValidationError> {
        let value = value.trim();
        let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
        let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

        if whole.is_empty() || !digits(whole) || !digits(fraction) || fraction.len() > 2 {
            return Err(ValidationError::new("decimal_amount"));
        }
        if value.ends_with('.') {
            return Err(ValidationError::new("decimal_amount"));
        }
        Ok(())
    }

    /// Validates a phone number: digits with an optional leading `+`.
    pub fn contact_number(value: &str) -> Result<(), ValidationError> {
        let digits = value.strip_prefix('+').unwrap_or(value);
        if !(7..=15).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new("contact_number"));
        }
        Ok(())
    }
}
