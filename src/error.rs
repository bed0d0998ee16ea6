//! Centralized error types for mailcat.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the mailcat library.
#[derive(Error, Debug)]
pub enum MailcatError {
    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The attachment file does not exist.
    #[error("cannot read the file: {0}")]
    AttachmentNotFound(PathBuf),

    /// An address could not be parsed by the transport layer.
    #[error("invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Base64 text could not be decoded.
    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    /// A submission-layer failure: connection, authentication, or relay
    /// rejection. All kinds are retried identically.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Convenience alias for `Result<T, MailcatError>`.
pub type Result<T> = std::result::Result<T, MailcatError>;

impl MailcatError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Allow `?` on `std::io::Error` inside functions returning `MailcatError`
/// when no path context is available (rare — prefer `MailcatError::io`).
impl From<std::io::Error> for MailcatError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<unknown>"),
            source,
        }
    }
}
