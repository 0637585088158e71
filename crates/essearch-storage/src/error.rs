//! Storage error types

use std::time::Duration;

use thiserror::Error;

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors raised while talking to the Elasticsearch cluster
#[derive(Debug, Error)]
pub enum StorageError {
    /// Network request failed
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// A node address could not be parsed as a URL
    #[error("Invalid node address {address:?}: {reason}")]
    InvalidUrl { address: String, reason: String },

    /// No node addresses were configured
    #[error("No Elasticsearch nodes configured")]
    NoNodes,

    /// Elasticsearch answered with a non-success status
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        status: reqwest::StatusCode,
        message: String,
    },

    /// Client build error
    #[error("Failed to build Elasticsearch client: {0}")]
    BuildError(String),

    /// Search response did not have the expected shape
    #[error("Failed to parse search results: {0}")]
    Decode(#[from] serde_json::Error),

    /// The cluster did not become reachable before the dial deadline
    #[error("Cluster not reachable within {0:?}: deadline exceeded")]
    DeadlineExceeded(Duration),
}

impl StorageError {
    /// Whether the error is a transient connectivity failure, as opposed to
    /// an unexpected answer from the node
    pub fn is_retryable(&self) -> bool {
        match self {
            StorageError::RequestFailed(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            StorageError::HttpStatus { status, .. } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}
