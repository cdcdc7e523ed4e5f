//! Shared primitives for the Admin Reports adapter crates.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the adapter crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common error categories for report queries.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// A literal could not be parsed in the expected format.
    #[error("parse error: {0}")]
    Parse(String),

    /// Missing or invalid runtime configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The API rejected the supplied credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The API answered with a non-success status.
    #[error("upstream error (status {status}): {message}")]
    Upstream {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message extracted from the response.
        message: String,
    },

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
