//! Indexer client error types.

use std::path::PathBuf;

/// Errors from indexer calls.
#[derive(Debug, thiserror::Error)]
pub enum IndexerError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Indexer returned a non-2xx status.
    #[error("indexer {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Local filesystem failure while materializing the file.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The storage network could not produce the file.
    #[error("{0}")]
    Retrieval(String),
    /// Retrieved content did not match what the indexer reported.
    #[error("verification failed: {0}")]
    Verification(String),
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl IndexerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
