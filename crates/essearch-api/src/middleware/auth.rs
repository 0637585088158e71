//! HTTP Basic authentication gate
//!
//! The gate only checks that a well-formed Basic credential is present and
//! forwards the username. Passwords are not checked against any user store:
//! every username/password pair is accepted. This is deliberate, the service
//! identifies callers rather than authorizing them.

use axum::{
    extract::{FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use tracing::debug;

use crate::error::ApiError;

/// Standard alphabet, padding optional
const CREDENTIALS_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Credentials carried by a Basic `Authorization` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Everything before the first `:`
    pub username: String,
    /// Never verified
    pub password: String,
}

/// Caller identity attached to authenticated requests.
///
/// Inserted into request extensions by [`require_basic_auth`]; handlers
/// behind the gate take it as an extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Username exactly as sent by the client
    pub username: String,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}

/// Parse a `Basic <base64(user:password)>` header value.
///
/// The scheme is matched case-insensitively. Returns `None` for any other
/// scheme, undecodable payloads, non UTF-8 credentials, or a payload
/// without `:`. The username is everything before the first `:`.
pub fn parse_basic_auth(value: &HeaderValue) -> Option<Credentials> {
    let value = value.to_str().ok()?;
    let scheme = value.get(..6)?;
    if !scheme.eq_ignore_ascii_case("basic ") {
        return None;
    }
    let encoded = &value[6..];

    let decoded = CREDENTIALS_ENGINE.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Reject requests without Basic credentials with 401, otherwise attach
/// [`AuthenticatedUser`] and run the inner handler. The inner response is
/// passed through untouched.
pub async fn require_basic_auth(mut request: Request, next: Next) -> Response {
    let credentials = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(parse_basic_auth);

    let Some(credentials) = credentials else {
        debug!("Rejecting {} {}: no basic credentials", request.method(), request.uri().path());
        return ApiError::Unauthorized.into_response();
    };

    request.extensions_mut().insert(AuthenticatedUser {
        username: credentials.username,
    });

    next.run(request).await
}
