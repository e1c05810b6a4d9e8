//! Application error type and its HTTP representation.
//!
//! Every fallible operation in the service and repository layers returns
//! [`AppError`]. Handlers propagate it with `?` and axum renders it through
//! [`IntoResponse`] as a JSON body:
//!
//! ```json
//! { "error": "slug in use", "code": "conflict", "details": { "slug": "promo" } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Machine-readable error payload embedded in JSON responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed client input.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Request rejected by the bot verification step.
    #[error("{message}")]
    Forbidden { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// A requested custom slug is already taken.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// No free generated slug was found within the retry bound.
    #[error("could not allocate a free slug after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    /// Store failures and other server-side faults.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::AllocationExhausted { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::Forbidden { .. } => "verification_failed",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::AllocationExhausted { .. } => "allocation_exhausted",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let details = match self {
            AppError::Validation { details, .. }
            | AppError::Forbidden { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::Conflict { details, .. }
            | AppError::Internal { details, .. } => details.clone(),
            AppError::AllocationExhausted { attempts } => json!({ "attempts": attempts }),
        };

        ErrorInfo {
            error: self.to_string(),
            code: self.code(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_error_info())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", e);
        AppError::internal("Database error", Value::Null)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or(Value::Null);
        AppError::bad_request("Invalid request", details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x", Value::Null).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::forbidden("x", Value::Null).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::not_found("x", Value::Null).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::conflict("x", Value::Null).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::AllocationExhausted { attempts: 10 }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::internal("x", Value::Null).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_info_uses_message_as_error_string() {
        let info = AppError::conflict("slug in use", json!({ "slug": "promo" })).to_error_info();

        assert_eq!(info.error, "slug in use");
        assert_eq!(info.code, "conflict");
        assert_eq!(info.details["slug"], "promo");
    }

    #[test]
    fn test_null_details_are_omitted() {
        let info = AppError::not_found("not found", Value::Null).to_error_info();
        let body = serde_json::to_value(&info).unwrap();

        assert_eq!(body, json!({ "error": "not found", "code": "not_found" }));
    }

    #[test]
    fn test_allocation_exhausted_reports_attempts() {
        let err = AppError::AllocationExhausted { attempts: 3 };
        let info = err.to_error_info();

        assert!(info.error.contains("3 attempts"));
        assert_eq!(info.details["attempts"], 3);
    }

    #[test]
    fn test_sqlx_error_maps_to_internal() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.to_string(), "Database error");
    }
}
