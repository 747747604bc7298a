//! Common error types for the statement extraction services

use thiserror::Error;

/// Common result type for dispatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the dispatch service
///
/// Dispatch outcomes are an explicit result/error union so callers and
/// tests can distinguish error kinds without matching on message text.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed request field
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Requested bank key has no registered extractor
    #[error("Unknown bank key '{bank}' (known keys: {known})")]
    UnknownBank { bank: String, known: String },

    /// Staging directory unusable
    #[error("Storage error: {0}")]
    Storage(String),

    /// A bank extractor failed on the given file
    #[error("Extractor for '{bank}' failed: {message}")]
    Extractor { bank: String, message: String },

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
