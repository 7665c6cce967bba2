//! User Entity
//!
//! Registered account. Created once at signup and read during login.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{email::Email, user_password::UserPassword};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier
    pub user_id: UserId,
    /// Login identifier (unique)
    pub email: Email,
    /// Argon2id hash; never leaves the application layer
    pub password: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// User awaiting persistence (no id yet)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password: UserPassword,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(email: Email, password: UserPassword, now: DateTime<Utc>) -> Self {
        Self {
            email,
            password,
            created_at: now,
        }
    }

    /// Attach the id assigned by the store
    pub fn into_user(self, user_id: UserId) -> User {
        User {
            user_id,
            email: self.email,
            password: self.password,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
