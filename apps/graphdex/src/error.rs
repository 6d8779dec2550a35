//! # Application Errors

use graphdex_core::IndexError;
use thiserror::Error;

/// Errors surfaced by the `graphdex` binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// An index operation failed.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// The configuration file or environment is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Output could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
