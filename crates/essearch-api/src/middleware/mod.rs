//! Request middleware

pub mod auth;
pub mod logging;

pub use auth::{parse_basic_auth, require_basic_auth, AuthenticatedUser, Credentials};
pub use logging::logging_middleware;
