//! API error types and handling

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use essearch_storage::StorageError;
use thiserror::Error;

use crate::models::ResponseEnvelope;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable Basic credentials on the request
    #[error("Authentication required")]
    Unauthorized,

    /// Query parameters failed validation
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// The search backend failed; details stay server side
    #[error("Search backend error: {0}")]
    Backend(#[from] StorageError),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to send to the client, if any
    fn public_message(&self) -> Option<&str> {
        match self {
            ApiError::BadRequest(message) => Some(message),
            ApiError::Unauthorized | ApiError::Backend(_) => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response =
            ResponseEnvelope::error(self.status_code(), self.public_message()).into_response();

        if matches!(self, ApiError::Unauthorized) {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(r#"Basic realm="essearch""#),
            );
        }

        response
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
