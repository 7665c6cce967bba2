//! Email Value Object
//!
//! Represents a validated email address used as the login identifier.
//! The address is stored as entered; no case folding is applied.

use kernel::validation::{self, ValidationError};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

/// Field name reported in validation errors
const FIELD: &str = "email";

/// Minimum email length (characters)
const EMAIL_MIN_LENGTH: usize = 1;

/// Maximum email length (characters)
const EMAIL_MAX_LENGTH: usize = 30;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();
        Self::check(&email)?;
        Ok(Self(email))
    }

    /// Run the email rules in order; the first failing rule is reported.
    pub fn check(email: &str) -> Result<(), ValidationError> {
        validation::required(FIELD, email, "email is required")?;
        validation::char_length_between(
            FIELD,
            email,
            EMAIL_MIN_LENGTH,
            EMAIL_MAX_LENGTH,
            "email must be 1 to 30 characters",
        )?;

        if !email.validate_email() {
            return Err(ValidationError::new(FIELD, "invalid email address"));
        }

        Ok(())
    }

    /// Wrap an address that has already passed a credentials validator
    pub(crate) fn from_validated(email: String) -> Self {
        Self(email)
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
