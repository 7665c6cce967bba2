//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use chrono::Utc;
use platform::password::CredentialHasher;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::credentials::{CredentialsValidator, UserCredentialsValidator};
use crate::application::token::SessionTokenService;
use crate::application::{LogInUseCase, SignUpUseCase};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_password::UserPassword;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{CredentialsRequest, SignUpResponse};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub validator: Arc<dyn CredentialsValidator>,
    pub tokens: Arc<SessionTokenService>,
    pub config: Arc<AuthConfig>,
    /// Verified against on login when the email is unknown
    pub decoy: Arc<UserPassword>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    /// Build state with the default credentials validator
    pub fn new(repo: R, hasher: Arc<dyn CredentialHasher>, config: AuthConfig) -> AuthResult<Self> {
        let tokens = SessionTokenService::new(&config)?;
        let decoy = UserPassword::decoy(hasher.as_ref())?;

        Ok(Self {
            repo: Arc::new(repo),
            hasher,
            validator: Arc::new(UserCredentialsValidator),
            tokens: Arc::new(tokens),
            config: Arc::new(config),
            decoy: Arc::new(decoy),
        })
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AuthResult<Json<SignUpResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|e| AuthError::MalformedRequest(e.body_text()))?;

    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.validator.clone(),
    );

    let output = use_case.execute(req.into(), Utc::now()).await?;

    Ok(Json(SignUpResponse {
        id: output.user_id.value(),
        email: output.email.into_db(),
    }))
}

// ============================================================================
// Log In
// ============================================================================

/// POST /login
pub async fn log_in<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|e| AuthError::MalformedRequest(e.body_text()))?;

    let use_case = LogInUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.validator.clone(),
        state.tokens.clone(),
        state.decoy.clone(),
    );

    let now = Utc::now();
    let output = use_case.execute(req.into(), now).await?;

    // Cookie outlives the token; the token's own expiry is what the gate checks
    let cookie = state
        .config
        .cookie_config()
        .build_set_cookie(&output.session_token, now + state.config.cookie_ttl);

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Log Out
// ============================================================================

/// POST /logout
///
/// Stateless: only instructs the client to drop the cookie.
pub async fn log_out<R>(State(state): State<AuthAppState<R>>) -> impl IntoResponse
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let cookie = state.config.cookie_config().build_delete_cookie();

    (StatusCode::OK, [(header::SET_COOKIE, cookie)])
}
