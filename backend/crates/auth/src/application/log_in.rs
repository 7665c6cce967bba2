//! Log In Use Case
//!
//! Authenticates a user and issues a session token.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::password::CredentialHasher;

use crate::application::credentials::{Credentials, CredentialsValidator};
use crate::application::token::SessionTokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Log in output
#[derive(Debug)]
pub struct LogInOutput {
    /// Signed session token for the cookie
    pub session_token: String,
}

/// Log in use case
pub struct LogInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    hasher: Arc<dyn CredentialHasher>,
    validator: Arc<dyn CredentialsValidator>,
    tokens: Arc<SessionTokenService>,
    decoy: Arc<UserPassword>,
}

impl<U> LogInUseCase<U>
where
    U: UserRepository,
{
    /// `decoy` comes from [`UserPassword::decoy`] with the same hasher.
    pub fn new(
        user_repo: Arc<U>,
        hasher: Arc<dyn CredentialHasher>,
        validator: Arc<dyn CredentialsValidator>,
        tokens: Arc<SessionTokenService>,
        decoy: Arc<UserPassword>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            tokens,
            decoy,
        }
    }

    pub async fn execute(
        &self,
        credentials: Credentials,
        now: DateTime<Utc>,
    ) -> AuthResult<LogInOutput> {
        self.validator.validate(&credentials)?;

        let Credentials { email, password } = credentials;
        let email = Email::from_validated(email);
        let raw_password = RawPassword::from_validated(password);

        let user = self.user_repo.find_by_email(&email).await?;

        // Unknown emails verify against the decoy
        let stored = match &user {
            Some(user) => user.password.clone(),
            None => UserPassword::clone(&self.decoy),
        };
        let hasher = Arc::clone(&self.hasher);
        let matches =
            tokio::task::spawn_blocking(move || stored.verify_with(hasher.as_ref(), &raw_password))
                .await
                .map_err(|e| AuthError::Internal(e.to_string()))??;

        let Some(user) = user else {
            return Err(AuthError::UserNotFound);
        };

        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let session_token = self.tokens.issue(user.user_id, now)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LogInOutput { session_token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::application::config::AuthConfig;
    use crate::application::credentials::UserCredentialsValidator;
    use crate::application::sign_up::SignUpUseCase;
    use crate::domain::entity::user::NewUser;
    use crate::infra::memory::InMemoryUserRepository;
    use platform::password::{
        Argon2Hasher, ClearTextPassword, HashCost, HashedPassword, PasswordHashError,
    };

    /// Argon2 with the cheapest cost, counting calls to `verify`
    struct CountingHasher {
        inner: Argon2Hasher,
        verifications: AtomicUsize,
    }

    impl CountingHasher {
        fn new() -> Self {
            Self {
                inner: Argon2Hasher::new(HashCost::minimal()).unwrap(),
                verifications: AtomicUsize::new(0),
            }
        }

        fn verifications(&self) -> usize {
            self.verifications.load(Ordering::SeqCst)
        }
    }

    impl CredentialHasher for CountingHasher {
        fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
            self.inner.hash(password)
        }

        fn verify(
            &self,
            password: &ClearTextPassword,
            hash: &HashedPassword,
        ) -> Result<bool, PasswordHashError> {
            self.verifications.fetch_add(1, Ordering::SeqCst);
            self.inner.verify(password, hash)
        }
    }

    struct Fixture {
        repo: Arc<InMemoryUserRepository>,
        hasher: Arc<CountingHasher>,
        sign_up: SignUpUseCase<InMemoryUserRepository>,
        log_in: LogInUseCase<InMemoryUserRepository>,
        tokens: Arc<SessionTokenService>,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(CountingHasher::new());
        let dyn_hasher: Arc<dyn CredentialHasher> = hasher.clone();
        let validator: Arc<dyn CredentialsValidator> = Arc::new(UserCredentialsValidator);
        let tokens =
            Arc::new(SessionTokenService::new(&AuthConfig::with_secret("test-secret")).unwrap());
        let decoy = Arc::new(UserPassword::decoy(dyn_hasher.as_ref()).unwrap());

        Fixture {
            repo: repo.clone(),
            hasher,
            sign_up: SignUpUseCase::new(repo.clone(), dyn_hasher.clone(), validator.clone()),
            log_in: LogInUseCase::new(repo, dyn_hasher, validator, tokens.clone(), decoy),
            tokens,
        }
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_log_in_issues_token_for_user() {
        let f = fixture();
        let now = Utc::now();
        let created = f
            .sign_up
            .execute(credentials("a@example.com", "secret1"), now)
            .await
            .unwrap();

        let output = f
            .log_in
            .execute(credentials("a@example.com", "secret1"), now)
            .await
            .unwrap();

        assert_eq!(
            f.tokens.verify(&output.session_token, now).unwrap(),
            created.user_id
        );
    }

    #[tokio::test]
    async fn test_log_in_wrong_password() {
        let f = fixture();
        f.sign_up
            .execute(credentials("a@example.com", "secret1"), Utc::now())
            .await
            .unwrap();

        let result = f
            .log_in
            .execute(credentials("a@example.com", "secret2"), Utc::now())
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert_eq!(f.hasher.verifications(), 1);
    }

    #[tokio::test]
    async fn test_log_in_unknown_email_still_verifies() {
        let f = fixture();
        let result = f
            .log_in
            .execute(credentials("nobody@example.com", "secret1"), Utc::now())
            .await;

        assert!(matches!(result, Err(AuthError::UserNotFound)));
        assert_eq!(f.hasher.verifications(), 1);
    }

    #[tokio::test]
    async fn test_log_in_unknown_email_with_decoy_password() {
        let f = fixture();
        let result = f
            .log_in
            .execute(
                credentials("nobody@example.com", "decoy-password-never-issued"),
                Utc::now(),
            )
            .await;

        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_log_in_validates_before_lookup() {
        let f = fixture();
        let result = f
            .log_in
            .execute(credentials("a@example.com", "wrong"), Utc::now())
            .await;
        assert!(matches!(result, Err(AuthError::Validation(_))));
        assert_eq!(f.hasher.verifications(), 0);
    }

    #[tokio::test]
    async fn test_log_in_unreadable_stored_hash() {
        let f = fixture();
        let email = Email::new("a@example.com").unwrap();
        f.repo
            .create(&NewUser::new(
                email,
                UserPassword::from_db("garbage"),
                Utc::now(),
            ))
            .await
            .unwrap();

        let err = f
            .log_in
            .execute(credentials("a@example.com", "secret1"), Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Hashing(_)));
        assert_eq!(err.to_app_error().status_code(), 500);
        assert_eq!(err.to_app_error().message(), "Internal server error");
    }
}
