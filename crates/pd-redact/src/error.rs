//! Error types for the redaction engine.

use thiserror::Error;

/// Result type for redaction operations.
pub type Result<T> = std::result::Result<T, RedactionError>;

/// Errors that can occur while building or loading a redaction rule.
///
/// Applying a rule never fails: a field missing from a record is a no-op.
#[derive(Error, Debug)]
pub enum RedactionError {
    /// The separator, mask or field set cannot delimit fields unambiguously.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// I/O error during config file operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RedactionError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        RedactionError::Configuration(msg.into())
    }
}
