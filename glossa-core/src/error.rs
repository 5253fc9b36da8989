//! Error types for routing and tokenizer backends

use thiserror::Error;

/// Errors raised while loading or validating a routing table
#[derive(Error, Debug)]
pub enum RoutingError {
    /// The table could not be parsed
    #[error("failed to parse routing table: {0}")]
    Parse(#[from] toml::de::Error),

    /// The table file could not be read
    #[error("failed to read routing table {path}: {source}")]
    Io {
        /// Path of the table file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The table parsed but is inconsistent
    #[error("invalid routing table: {0}")]
    Invalid(String),
}

/// Errors raised by a tokenizer backend
///
/// These never escape a [`crate::TokenizerBinding`]; they are either turned
/// into a fallback at construction or into an empty token sequence per call.
#[derive(Error, Debug)]
pub enum BackendError {
    /// I/O failure talking to the backend
    #[error("backend I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend process exited or closed its output
    #[error("backend process closed its output")]
    Closed,

    /// The backend replied with something that cannot be read as tokens
    #[error("unreadable backend output: {0}")]
    Protocol(String),

    /// Backend support was not compiled into this build
    #[error("backend '{0}' is not available in this build")]
    Unavailable(String),

    /// A backend resource (dictionary, model) failed to load
    #[error("failed to load backend resource {path}: {reason}")]
    Resource {
        /// Path of the resource
        path: String,
        /// What went wrong
        reason: String,
    },
}

/// Result type for backend operations
pub type BackendResult<T> = std::result::Result<T, BackendError>;
