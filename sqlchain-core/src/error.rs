//! Error types for sqlchain

use thiserror::Error;

/// The main error type for sqlchain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An expression's `?` markers do not line up with the values supplied for it
    #[error("Argument count mismatch in '{expression}': {markers} placeholder(s), {values} value(s)")]
    ArgumentCountMismatch {
        expression: String,
        markers: usize,
        values: usize,
    },

    /// Invalid query configuration
    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Convenience Result type for sqlchain operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new argument count mismatch error
    pub fn argument_count_mismatch(expression: impl Into<String>, markers: usize, values: usize) -> Self {
        Self::ArgumentCountMismatch {
            expression: expression.into(),
            markers,
            values,
        }
    }

    /// Create a new invalid query error
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}
