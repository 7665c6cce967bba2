//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::CredentialHasher;

use crate::application::credentials::{Credentials, CredentialsValidator};
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up output
#[derive(Debug, Clone)]
pub struct SignUpOutput {
    pub user_id: UserId,
    pub email: Email,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    hasher: Arc<dyn CredentialHasher>,
    validator: Arc<dyn CredentialsValidator>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        hasher: Arc<dyn CredentialHasher>,
        validator: Arc<dyn CredentialsValidator>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
        }
    }

    pub async fn execute(
        &self,
        credentials: Credentials,
        now: DateTime<Utc>,
    ) -> AuthResult<SignUpOutput> {
        self.validator.validate(&credentials)?;

        let Credentials { email, password } = credentials;
        let email = Email::from_validated(email);
        let raw_password = RawPassword::from_validated(password);

        // Hashing blocks; run it on the blocking pool
        let hasher = Arc::clone(&self.hasher);
        let password_hash =
            tokio::task::spawn_blocking(move || UserPassword::hash_with(hasher.as_ref(), &raw_password))
                .await
                .map_err(|e| AuthError::Internal(e.to_string()))??;

        let user = self
            .user_repo
            .create(&NewUser::new(email, password_hash, now))
            .await?;

        tracing::info!(user_id = %user.user_id, "User signed up");

        Ok(SignUpOutput {
            user_id: user.user_id,
            email: user.email,
        })
    }
}
