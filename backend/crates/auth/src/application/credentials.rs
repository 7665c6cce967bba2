//! Credentials Validation
//!
//! Shared by signup and login.

use kernel::validation::ValidationError;

use crate::domain::value_object::{email::Email, user_password::RawPassword};

/// Email + clear text password as received from the client
///
/// Lives only for the duration of a request.
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Checks a credentials candidate before any hashing or lookup
pub trait CredentialsValidator: Send + Sync {
    fn validate(&self, credentials: &Credentials) -> Result<(), ValidationError>;
}

/// Email rules, then password rules; first failure wins
#[derive(Debug, Clone, Copy, Default)]
pub struct UserCredentialsValidator;

impl CredentialsValidator for UserCredentialsValidator {
    fn validate(&self, credentials: &Credentials) -> Result<(), ValidationError> {
        Email::check(&credentials.email)?;
        RawPassword::check(&credentials.password)
    }
}
