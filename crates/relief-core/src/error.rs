//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for Relief Hub.
///
/// Covers domain failures raised by services, infrastructure failures raised
/// by the storage and cache backends, and internal errors.
#[derive(Error, Debug)]
pub enum ReliefError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Infrastructure Errors ============
    /// A storage backend operation failed
    #[error("{store}.{operation} failed: {message}")]
    Storage {
        store: String,
        operation: &'static str,
        message: String,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Payload (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReliefError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Storage { .. }
            | Self::Database(_)
            | Self::Cache(_)
            | Self::Configuration(_)
            | Self::Serialization(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Storage { .. } => "STORAGE_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a storage error for a named store operation.
    #[must_use]
    pub fn storage<S, M>(store: S, operation: &'static str, message: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::Storage {
            store: store.into(),
            operation,
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

impl From<serde_json::Error> for ReliefError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `ReliefError`.
    ///
    /// Infrastructure failures are reported with a generic message so that
    /// backend details never leak to clients.
    #[must_use]
    pub fn from_error(error: &ReliefError) -> Self {
        let message = if error.status_code() >= 500 {
            "Internal server error".to_string()
        } else {
            error.to_string()
        };

        Self {
            code: error.error_code().to_string(),
            message,
        }
    }
}

impl From<&ReliefError> for ErrorResponse {
    fn from(error: &ReliefError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ReliefError::not_found("Task", "task-1").status_code(), 404);
        assert_eq!(ReliefError::validation("missing field").status_code(), 400);
        assert_eq!(ReliefError::Cache("down".to_string()).status_code(), 500);
        assert_eq!(
            ReliefError::storage("documents:tasks", "read", "boom").status_code(),
            500
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ReliefError::not_found("Task", 1).error_code(), "NOT_FOUND");
        assert_eq!(ReliefError::validation("bad").error_code(), "VALIDATION_ERROR");
        assert_eq!(
            ReliefError::storage("blobs", "create", "disk full").error_code(),
            "STORAGE_ERROR"
        );
        assert_eq!(ReliefError::internal("oops").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_storage_error_display() {
        let err = ReliefError::storage("documents:help-requests", "update", "no such row");
        assert_eq!(
            err.to_string(),
            "documents:help-requests.update failed: no such row"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ReliefError = json_err.into();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_error_response_hides_internal_details() {
        let err = ReliefError::Database("password=hunter2".to_string());
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "DATABASE_ERROR");
        assert_eq!(response.message, "Internal server error");
    }

    #[test]
    fn test_error_response_keeps_client_errors() {
        let err = ReliefError::not_found("HelpRequest", "req-1");
        let response = ErrorResponse::from(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(response.message.contains("req-1"));
    }

    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse::from_error(&ReliefError::validation("x"));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "VALIDATION_ERROR", "message": "Validation error: x"})
        );
    }
}
