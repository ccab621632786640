//! JSON error responses
//!
//! Every failure leaves the API as `{error, message, details?}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Error body returned by every endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Short label, e.g. "Gadget not found"
    pub error: String,
    pub message: String,
    /// Field-level messages for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub message: String,
    pub details: Option<Vec<String>>,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn validation(details: Vec<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: "Validation error".into(),
            message: details.join("; "),
            details: Some(details),
        }
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Access denied", message)
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "Invalid token", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "Forbidden", message)
    }

    pub fn route_not_found(path: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "Route not found",
            format!("The endpoint {} does not exist", path),
        )
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            "Internal server error",
        )
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(details) => Self::validation(details),
            DomainError::NotFound { entity, id } => Self::new(
                StatusCode::NOT_FOUND,
                format!("{} not found", entity),
                format!("No {} found with ID: {}", entity.to_lowercase(), id),
            ),
            DomainError::Conflict(message) => Self::new(StatusCode::CONFLICT, "Conflict", message),
            DomainError::InvalidState(message) => {
                Self::new(StatusCode::BAD_REQUEST, "Invalid state", message)
            }
            DomainError::AuthenticationFailed => Self::new(
                StatusCode::UNAUTHORIZED,
                "Authentication failed",
                err.to_string(),
            ),
            DomainError::Unauthorized(message) => Self::access_denied(message),
            DomainError::Forbidden(message) => Self::forbidden(message),
            DomainError::Storage(_) | DomainError::Internal(_) => {
                tracing::error!(error = %err, "Request failed");
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.error,
            message: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_errors_to_status_codes() {
        let cases = [
            (DomainError::validation("Name is required"), StatusCode::BAD_REQUEST),
            (DomainError::gadget_not_found("x"), StatusCode::NOT_FOUND),
            (DomainError::Conflict("dup".into()), StatusCode::CONFLICT),
            (DomainError::InvalidState("again".into()), StatusCode::BAD_REQUEST),
            (DomainError::AuthenticationFailed, StatusCode::UNAUTHORIZED),
            (DomainError::Unauthorized("no token".into()), StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (DomainError::Storage("db down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = ApiError::from(DomainError::gadget_not_found("abc"));
        assert_eq!(err.error, "Gadget not found");
        assert_eq!(err.message, "No gadget found with ID: abc");
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let err = ApiError::from(DomainError::Storage("connection refused at 10.0.0.3".into()));
        assert!(!err.message.contains("10.0.0.3"));
        assert!(err.details.is_none());
    }

    #[test]
    fn validation_keeps_field_messages() {
        let err = ApiError::from(DomainError::Validation(vec![
            "Name is required".into(),
            "Codename is required".into(),
        ]));
        assert_eq!(err.error, "Validation error");
        assert_eq!(err.details.as_ref().map(Vec::len), Some(2));
    }
}
