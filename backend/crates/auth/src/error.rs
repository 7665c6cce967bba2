//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::ValidationError;
use platform::password::PasswordHashError;
use thiserror::Error;

use crate::application::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Message returned for both unknown email and wrong password
const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request body could not be decoded
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Request body decoded but failed a validation rule
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No user with the given email
    #[error("User not found")]
    UserNotFound,

    /// Invalid credentials (wrong password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, invalid or expired session token
    #[error("Unauthorized")]
    Unauthorized,

    /// Password hashing failed or stored hash is unreadable
    #[error("Password hashing error: {0}")]
    Hashing(String),

    /// Database error (including uniqueness violations)
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MalformedRequest(_) | AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::UserNotFound | AuthError::InvalidCredentials | AuthError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Hashing(_) | AuthError::Persistence(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MalformedRequest(_) | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::UserNotFound | AuthError::InvalidCredentials | AuthError::Unauthorized => {
                ErrorKind::Unauthorized
            }
            AuthError::Hashing(_) | AuthError::Persistence(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server-side details never reach the response body.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::MalformedRequest(_) => AppError::bad_request(self.to_string()),
            AuthError::Validation(e) => AppError::from(e.clone()),
            AuthError::UserNotFound | AuthError::InvalidCredentials => {
                AppError::unauthorized(LOGIN_FAILED_MESSAGE)
                    .with_action("Check your email and password")
            }
            AuthError::Unauthorized => {
                AppError::unauthorized("Unauthorized").with_action("Log in again")
            }
            AuthError::Hashing(_) | AuthError::Persistence(_) | AuthError::Internal(_) => {
                AppError::internal()
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Persistence(msg) => {
                tracing::error!(error = %msg, "Auth database error");
            }
            AuthError::Hashing(msg) => {
                tracing::error!(error = %msg, "Password hashing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::UserNotFound => {
                tracing::info!("Login attempt for unknown email");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Persistence(err.to_string())
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Hashing(err.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        tracing::debug!(reason = %err, "Session token rejected");
        AuthError::Unauthorized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_failures_are_indistinguishable() {
        let not_found = AuthError::UserNotFound.to_app_error();
        let mismatch = AuthError::InvalidCredentials.to_app_error();

        assert_eq!(not_found.status_code(), 401);
        assert_eq!(not_found.message(), mismatch.message());
        assert_eq!(not_found.kind(), mismatch.kind());
        assert_eq!(not_found.action(), Some("Check your email and password"));
        assert_eq!(not_found.action(), mismatch.action());
    }

    #[test]
    fn test_validation_message_is_reported() {
        let err = AuthError::from(ValidationError::new("email", "invalid email address"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_app_error().message(), "invalid email address");
    }

    #[test]
    fn test_server_errors_hide_detail() {
        for err in [
            AuthError::Persistence("duplicate key value violates unique constraint".into()),
            AuthError::Hashing("out of memory".into()),
            AuthError::Internal("join error".into()),
        ] {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(err.to_app_error().message(), "Internal server error");
            assert!(err.to_app_error().action().is_none());
        }
    }

    #[test]
    fn test_token_errors_become_unauthorized() {
        for err in [
            TokenError::Expired,
            TokenError::InvalidSignature,
            TokenError::Malformed,
        ] {
            let auth_err = AuthError::from(err);
            assert!(matches!(auth_err, AuthError::Unauthorized));
            let app_err = auth_err.to_app_error();
            assert_eq!(app_err.message(), "Unauthorized");
            assert_eq!(app_err.action(), Some("Log in again"));
        }
    }
}
