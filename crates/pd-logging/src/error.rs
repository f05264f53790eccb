//! Error types for logger construction and output.

use pd_redact::RedactionError;
use thiserror::Error;

/// Result type for logging operations.
pub type Result<T> = std::result::Result<T, LoggingError>;

/// Errors raised while building loggers or writing records.
///
/// Messages never carry record contents.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// The redaction rule for a logger could not be built.
    #[error(transparent)]
    Redaction(#[from] RedactionError),

    /// The sink rejected a write or flush.
    #[error("sink error: {0}")]
    Sink(#[source] std::io::Error),

    /// A row column or value would break field boundaries in the rendered line.
    #[error("row column '{column}' cannot be rendered as a delimited segment")]
    MalformedRow { column: String },

    /// A global subscriber could not be installed.
    #[error("logging init error: {0}")]
    Init(String),
}
