//! Stable error codes carried in every error response.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error identifiers shared by all endpoints.
///
/// Ranges:
/// - 1000-1999: request and application errors
/// - 2000-2999: persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request body failed field validation
    ValidationError,
    /// Path identifier is not a valid integer
    InvalidId,
    /// Body could not be read as JSON of the expected shape
    JsonExtraction,
    NotFound,
    InternalError,
    Unauthorized,
    /// Request is well-formed but inconsistent (e.g. path/body id mismatch)
    BadRequest,
    /// Store rejected or failed a statement
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidId => "INVALID_ID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::BadRequest => "BAD_REQUEST",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }

    /// Integer code used in structured logs
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidId => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Unauthorized => 1006,
            Self::BadRequest => 1007,
            Self::DatabaseError => 2003,
        }
    }

    /// Client-facing message used when the error carries none of its own.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "One or more validation errors occurred.",
            Self::InvalidId => "The identifier in the path must be an integer.",
            Self::JsonExtraction => "Failed to parse request body.",
            Self::NotFound => "The requested resource was not found.",
            Self::InternalError | Self::DatabaseError => {
                "An unexpected error occurred. Please try again later."
            }
            Self::Unauthorized => "Unauthorized access.",
            Self::BadRequest => "The request was invalid.",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
