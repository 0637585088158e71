#![warn(missing_docs)]

//! essearch HTTP front-end
//!
//! Authenticates callers with HTTP Basic credentials, translates query-string
//! parameters into Elasticsearch search options, and wraps the hits in a
//! JSON envelope.
//!
//! # Endpoints
//!
//! - `GET /v1/products` - Search (Basic auth required)
//! - `GET /` - HTML search form (path configurable)
//! - `GET /health` - Backend health check

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod query;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(test)]
mod test_support;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use routes::build_router;
pub use server::ApiServer;
pub use state::AppState;
