//! Validation Rules
//!
//! Field-level rules shared by request validators. Rules are evaluated
//! one at a time by callers; the first failing rule produces the error.

use std::borrow::Cow;

use thiserror::Error;

/// A single failed validation rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    field: &'static str,
    message: Cow<'static, str>,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Human-readable message, safe to return to the caller
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Fails when `value` is empty.
pub fn required(
    field: &'static str,
    value: &str,
    message: &'static str,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}

/// Fails unless `value` has between `min` and `max` characters (inclusive).
///
/// Counts Unicode scalar values, not bytes.
pub fn char_length_between(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
    message: &'static str,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}
