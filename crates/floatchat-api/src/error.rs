//! API error types and JSON error response formatting.
//!
//! ApiError provides a consistent JSON error response format across all
//! endpoints, mapping internal errors to appropriate HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::auth::AuthError;
use floatchat_chat::ChatError;

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g., "bad_request", "unauthorized").
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type that maps to HTTP status codes and JSON responses.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request - missing or invalid parameters.
    BadRequest(String),
    /// 401 Unauthorized - missing or rejected credentials.
    Unauthorized(String),
    /// 404 Not Found - resource does not exist.
    NotFound(String),
    /// 500 Internal Server Error - unexpected server error.
    Internal(String),
    /// 503 Service Unavailable - collaborator not configured or unreachable.
    ServiceUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg)
            }
        };

        let body = ErrorBody {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match &err {
            ChatError::EmptyMessage | ChatError::MessageTooLong(_) => {
                ApiError::BadRequest(err.to_string())
            }
            ChatError::State(msg) => ApiError::Internal(msg.clone()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match &err {
            AuthError::InvalidCredentials(msg) => ApiError::Unauthorized(msg.clone()),
            AuthError::Provider(msg) => ApiError::BadRequest(msg.clone()),
            AuthError::NotConfigured => {
                ApiError::ServiceUnavailable("auth provider is not configured".to_string())
            }
            AuthError::Network(msg) => ApiError::ServiceUnavailable(msg.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_mapping() {
        assert!(matches!(
            ApiError::from(ChatError::EmptyMessage),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(ChatError::MessageTooLong(10)),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(ChatError::State("poisoned".into())),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn test_auth_error_mapping() {
        assert!(matches!(
            ApiError::from(AuthError::InvalidCredentials("bad password".into())),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::NotConfigured),
            ApiError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::Network("timeout".into())),
            ApiError::ServiceUnavailable(_)
        ));
    }
}
