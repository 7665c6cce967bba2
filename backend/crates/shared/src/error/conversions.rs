//! Error conversions - From implementations for common error types
//!
//! Provides conversion into [`AppError`] and the HTTP response mapping.

use super::app_error::AppError;
use crate::validation::ValidationError;

// ============================================================================
// Validation conversions
// ============================================================================

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        // 検証メッセージはそのままクライアントへ返す
        AppError::bad_request(err.message().to_string()).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn test_validation_error_conversion() {
        let err = ValidationError::new("email", "invalid email address");
        let app_err: AppError = err.into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
        assert_eq!(app_err.message(), "invalid email address");
    }

    #[test]
    fn test_validation_error_with_owned_message() {
        let max = 10;
        let err = ValidationError::new("title", format!("title must be 1 to {max} characters"));
        let app_err = AppError::from(err);
        assert_eq!(app_err.status_code(), 400);
        assert_eq!(app_err.message(), "title must be 1 to 10 characters");
        assert!(std::error::Error::source(&app_err).is_some());
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_into_response_status() {
        use axum::response::IntoResponse;

        let response = AppError::unauthorized("Unauthorized").into_response();
        assert_eq!(response.status().as_u16(), 401);

        let response = AppError::internal().into_response();
        assert_eq!(response.status().as_u16(), 500);
    }
}
