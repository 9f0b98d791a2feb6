//! Application-wide error types.

use serde_json::{Value, json};
use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Access denied.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error on a single input field.
    #[error("Validation error: {message}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable reason.
        message: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation { .. } => 400,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Renders the JSON error body returned to API clients.
    ///
    /// Server-side failures get a generic message so internals never leak.
    #[must_use]
    pub fn to_body(&self) -> Value {
        match self {
            Self::Validation { field, message } => json!({
                "error": self.error_code(),
                "field": field,
                "message": message,
            }),
            Self::Database(_) => json!({
                "error": self.error_code(),
                "message": "An error occurred",
            }),
            _ => json!({
                "error": self.error_code(),
                "message": self.to_string(),
            }),
        }
    }
}
