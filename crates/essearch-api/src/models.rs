//! API request and response models

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use essearch_storage::SearchOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of every search endpoint response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResponseEnvelope {
    /// Search went through; `results` is always an array
    Success {
        /// Matching documents in backend order
        results: Vec<Value>,
    },
    /// Request failed
    Error {
        /// HTTP status code
        code: u16,
        /// Human readable reason
        #[serde(rename = "error")]
        message: String,
    },
}

impl ResponseEnvelope {
    /// Wrap search results
    pub fn success(results: Vec<Value>) -> Self {
        ResponseEnvelope::Success { results }
    }

    /// Build an error envelope, falling back to the standard status text
    /// when no message is given
    pub fn error(status: StatusCode, message: Option<&str>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .or_else(|| status.canonical_reason())
            .unwrap_or("Unknown Error");

        ResponseEnvelope::Error {
            code: status.as_u16(),
            message: message.to_string(),
        }
    }

    /// HTTP status the envelope is sent with
    pub fn status_code(&self) -> StatusCode {
        match self {
            ResponseEnvelope::Success { .. } => StatusCode::OK,
            ResponseEnvelope::Error { code, .. } => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// A validated search: the phrase plus translated options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Lucene query-string phrase, never empty
    pub phrase: String,
    /// Pagination, sorting and filter
    pub options: SearchOptions,
}

/// Health endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `unhealthy`
    pub status: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime: u64,
}
