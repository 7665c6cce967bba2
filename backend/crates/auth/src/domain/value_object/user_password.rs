//! User Password Value Object
//!
//! Domain value object for user passwords.
//! Delegates to `platform::password` for cryptographic operations.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//! use platform::password::{Argon2Hasher, HashCost};
//!
//! let hasher = Argon2Hasher::new(HashCost::minimal()).unwrap();
//!
//! // Create from user input
//! let raw = RawPassword::new("secret1".to_string()).unwrap();
//!
//! // Hash for storage
//! let hashed = UserPassword::hash_with(&hasher, &raw).unwrap();
//!
//! // Verify later
//! assert!(hashed.verify_with(&hasher, &raw).unwrap());
//! ```

use kernel::validation::{self, ValidationError};
use platform::password::{ClearTextPassword, CredentialHasher, HashedPassword, PasswordHashError};
use std::fmt;

/// Field name reported in validation errors
const FIELD: &str = "password";

const PASSWORD_MIN_LENGTH: usize = 6;
const PASSWORD_MAX_LENGTH: usize = 30;

/// Hashed once per process; verified against when the email is unknown
const DECOY_PASSWORD: &str = "decoy-password-never-issued";

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Wrapper around `ClearTextPassword`; memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with validation
    ///
    /// ## Validation Rules
    /// - Required
    /// - 6 to 30 characters
    pub fn new(raw: String) -> Result<Self, ValidationError> {
        let clear_text = ClearTextPassword::new(raw);
        Self::check(clear_text.as_str())?;
        Ok(Self(clear_text))
    }

    /// Wrap input that has already passed a credentials validator
    pub(crate) fn from_validated(raw: String) -> Self {
        Self(ClearTextPassword::new(raw))
    }

    /// Run the password rules in order; the first failing rule is reported.
    pub fn check(raw: &str) -> Result<(), ValidationError> {
        validation::required(FIELD, raw, "password is required")?;
        validation::char_length_between(
            FIELD,
            raw,
            PASSWORD_MIN_LENGTH,
            PASSWORD_MAX_LENGTH,
            "password must be 6 to 30 characters",
        )
    }

    /// Access the inner ClearTextPassword
    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password, safe to persist
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password with the given hasher
    pub fn hash_with(
        hasher: &dyn CredentialHasher,
        raw: &RawPassword,
    ) -> Result<Self, PasswordHashError> {
        hasher.hash(raw.inner()).map(Self)
    }

    /// Hash of a fixed value no account can log in with
    ///
    /// Login verifies against it when the email is unknown, so both
    /// failure paths pay the same hashing cost.
    pub fn decoy(hasher: &dyn CredentialHasher) -> Result<Self, PasswordHashError> {
        hasher
            .hash(&ClearTextPassword::new(DECOY_PASSWORD.to_string()))
            .map(Self)
    }

    /// Verify a raw password against this hash
    pub fn verify_with(
        &self,
        hasher: &dyn CredentialHasher,
        raw: &RawPassword,
    ) -> Result<bool, PasswordHashError> {
        hasher.verify(raw.inner(), &self.0)
    }

    /// Restore from database
    pub fn from_db(phc: impl Into<String>) -> Self {
        Self(HashedPassword::from_stored(phc))
    }

    /// PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}
