//! API route definitions

use axum::{middleware::from_fn, routing::get, Router};

use crate::{
    config::{ServerConfig, HEALTH_PATH, SEARCH_PATH},
    handlers::{health, index, search},
    middleware::{logging_middleware, require_basic_auth},
    state::AppState,
};

/// Build the application router.
///
/// Only the search endpoint sits behind the Basic auth gate; the form and
/// health check are public.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route(
            SEARCH_PATH,
            get(search::search_products).route_layer(from_fn(require_basic_auth)),
        )
        .route(&config.index_path, get(index::index_page))
        .route(HEALTH_PATH, get(health::health_check))
        .layer(from_fn(logging_middleware))
        .with_state(state)
}
