//! Error types for classification and label statistics

use thiserror::Error;

/// Errors raised by the domain labelling pipeline
#[derive(Error, Debug)]
pub enum DomainError {
    /// Model files could not be fetched or loaded
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// The model's tokenizer failed
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// The forward pass failed
    #[error("inference failed: {0}")]
    Inference(String),

    /// The model predicted a class index absent from its label map
    #[error("no label for class index {0}")]
    UnknownClass(usize),

    /// The model returned a different number of rows than inputs
    #[error("model returned {got} rows for {expected} inputs")]
    RowCount {
        /// Inputs sent
        expected: usize,
        /// Rows received
        got: usize,
    },

    /// An input line could not be read as a document
    #[error("malformed input at line {line}: {reason}")]
    Malformed {
        /// 1-based line number
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A label count line could not be parsed
    #[error("invalid label count at line {line}: {reason}")]
    Stats {
        /// 1-based line number
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Classifier configuration could not be parsed
    #[error("invalid classifier configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(feature = "candle")]
impl From<candle_core::Error> for DomainError {
    fn from(e: candle_core::Error) -> Self {
        DomainError::Inference(e.to_string())
    }
}

/// Result type for domain labelling
pub type Result<T> = std::result::Result<T, DomainError>;
