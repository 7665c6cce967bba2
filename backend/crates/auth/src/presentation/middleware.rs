//! Auth Middleware
//!
//! Access gate for protected routes and the extractor handlers use to
//! obtain the authenticated user.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use kernel::id::UserId;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::SessionTokenService;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AccessGateState {
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<SessionTokenService>,
}

/// Caller identity established by [`require_session`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that requires a valid session token cookie
///
/// Every rejection is the same 401; the reason is only logged.
pub async fn require_session(
    State(gate): State<AccessGateState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = platform::cookie::extract_cookie(req.headers(), &gate.config.cookie_name)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::debug!("Session cookie missing");
            AuthError::Unauthorized
        })?;

    let user_id = gate.tokens.verify(&token, Utc::now())?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or(AuthError::Unauthorized)
    }
}
