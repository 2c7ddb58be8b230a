//! Validation helper functions for configuration types.

use crate::core::errors::{CodealignError, Result};

/// Validate that a usize value is greater than zero.
pub fn validate_positive_usize(value: usize, field: &str) -> Result<()> {
    if value == 0 {
        return Err(CodealignError::validation_field(
            format!("{} must be greater than 0", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that an optional usize limit, when set, is greater than zero.
pub fn validate_optional_limit(value: Option<usize>, field: &str) -> Result<()> {
    match value {
        Some(limit) => validate_positive_usize(limit, field),
        None => Ok(()),
    }
}

/// Validate that an f64 value is finite.
pub fn validate_finite(value: f64, field: &str) -> Result<()> {
    if !value.is_finite() {
        return Err(CodealignError::validation_field(
            format!("{} must be a finite number", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that a string value is not empty.
pub fn validate_non_empty(value: &str, field: &str) -> Result<()> {
    if value.is_empty() {
        return Err(CodealignError::validation_field(
            format!("{} must not be empty", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that a usize value is within a bounded range (inclusive).
pub fn validate_bounded_usize(value: usize, min: usize, max: usize, field: &str) -> Result<()> {
    if value < min || value > max {
        return Err(CodealignError::validation_field(
            format!("{} must be between {} and {}", field, min, max),
            field,
        ));
    }
    Ok(())
}
