//! Task Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::ValidationError;
use thiserror::Error;

pub type TaskResult<T> = Result<T, TaskError>;

#[derive(Debug, Error)]
pub enum TaskError {
    /// Task id or body could not be decoded
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Missing, or owned by someone else
    #[error("Task not found")]
    NotFound,

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TaskError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TaskError::MalformedRequest(_) | TaskError::Validation(_) => StatusCode::BAD_REQUEST,
            TaskError::NotFound => StatusCode::NOT_FOUND,
            TaskError::Persistence(_) | TaskError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TaskError::MalformedRequest(_) | TaskError::Validation(_) => ErrorKind::BadRequest,
            TaskError::NotFound => ErrorKind::NotFound,
            TaskError::Persistence(_) | TaskError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            TaskError::MalformedRequest(_) | TaskError::NotFound => {
                AppError::new(self.kind(), self.to_string())
            }
            TaskError::Validation(e) => AppError::from(e.clone()),
            TaskError::Persistence(_) | TaskError::Internal(_) => AppError::internal(),
        }
    }

    fn log(&self) {
        match self {
            TaskError::Persistence(msg) => {
                tracing::error!(error = %msg, "Task database error");
            }
            TaskError::Internal(msg) => {
                tracing::error!(message = %msg, "Task internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Task error");
            }
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<sqlx::Error> for TaskError {
    fn from(err: sqlx::Error) -> Self {
        TaskError::Persistence(err.to_string())
    }
}
