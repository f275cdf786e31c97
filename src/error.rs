//! Error types for the Maila library.
//!
//! Errors only surface while building components (loading corpora, reading
//! configuration, compiling tokenizer patterns). Once a conversation is
//! running, failures are reported as classification labels instead, so no
//! per-turn call returns a [`MailaError`].
//!
//! # Examples
//!
//! ```
//! use maila::error::{MailaError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(MailaError::corpus("corpus is empty"))
//! }
//!
//! assert!(load().is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Maila operations.
#[derive(Error, Debug)]
pub enum MailaError {
    /// I/O errors (reading corpora or configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Corpus-related errors (missing, empty or malformed corpora)
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Index construction errors
    #[error("Index error: {0}")]
    Index(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with MailaError.
pub type Result<T> = std::result::Result<T, MailaError>;

impl MailaError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        MailaError::Analysis(msg.into())
    }

    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        MailaError::Corpus(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        MailaError::Index(msg.into())
    }

    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        MailaError::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MailaError::corpus("no rows");
        assert_eq!(err.to_string(), "Corpus error: no rows");

        let err = MailaError::config("threshold out of range");
        assert_eq!(err.to_string(), "Config error: threshold out of range");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: MailaError = io_err.into();
        assert!(matches!(err, MailaError::Io(_)));
    }
}
