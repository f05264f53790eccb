//! Error types for credential hashing.

use thiserror::Error;

/// Result type for credential operations.
pub type Result<T> = std::result::Result<T, CredentialError>;

/// Errors raised by hashing and verification.
///
/// Messages never contain the plaintext.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The password cannot be fed to the hash function as-is.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A stored hash does not parse.
    #[error("malformed hash: {0}")]
    MalformedHash(String),

    /// Invalid hasher settings.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The OS random source failed.
    #[error("rng error: {0}")]
    Rng(String),

    /// The hash function itself failed.
    #[error("hashing error: {0}")]
    Hashing(String),
}

impl CredentialError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        CredentialError::MalformedHash(msg.into())
    }
}
