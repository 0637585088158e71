//! Product search endpoint

use axum::extract::{RawQuery, State};
use tracing::{debug, error};

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthenticatedUser,
    models::ResponseEnvelope,
    query,
    state::AppState,
};

/// Search products.
///
/// Validates the query string, forwards the search to the backend and wraps
/// the hits in a success envelope. Backend failures are logged with detail
/// and answered with a bare 500. If the client goes away the handler future
/// is dropped, which cancels the backend call.
pub async fn search_products(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    RawQuery(raw_query): RawQuery,
) -> ApiResult<ResponseEnvelope> {
    let request = query::translate(raw_query.as_deref())?;
    debug!(
        "Search by {:?}: {:?} {:?}",
        user.username, request.phrase, request.options
    );

    let results = state
        .searcher
        .search(&request.phrase, &request.options)
        .await
        .map_err(|e| {
            error!("Failed to perform search for {:?}: {}", user.username, e);
            ApiError::Backend(e)
        })?;

    Ok(ResponseEnvelope::success(results))
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
        time::Duration,
    };

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header::AUTHORIZATION, Request, StatusCode},
    };
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use essearch_storage::{HealthProbe, Result, SearchOptions, Searcher};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{
        config::ServerConfig,
        routes::build_router,
        state::AppState,
        test_support::{get, MockBackend},
    };

    #[tokio::test]
    async fn test_search_with_results() {
        let backend = Arc::new(MockBackend::with_results(vec![
            json!({"key": "value"}),
            json!({"answer": 42}),
        ]));

        let (status, body) = get(backend.clone(), "/v1/products?q=search+term", Some("test1:secret")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"status": "success", "results": [{"key": "value"}, {"answer": 42}]})
        );
        assert_eq!(
            backend.calls(),
            vec![("search term".to_string(), SearchOptions::default())]
        );
    }

    #[tokio::test]
    async fn test_search_with_empty_results() {
        let backend = Arc::new(MockBackend::default());

        let (status, body) = get(backend.clone(), "/v1/products?q=search+term", Some("test1:secret")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "success", "results": []}));
    }

    #[tokio::test]
    async fn test_search_translates_options() {
        let cases = [
            (
                "/v1/products?q=search+term&from=11&size=123",
                SearchOptions::new().with_from(11).with_size(123),
            ),
            (
                "/v1/products?q=search+term&sort=a:asc&sort=b:desc",
                SearchOptions::new().with_sort("a:asc").with_sort("b:desc"),
            ),
            (
                "/v1/products?q=search+term&filter=a:1+OR+b:2+and+c:3",
                SearchOptions::new().with_filter("a:1 OR b:2 and c:3"),
            ),
        ];

        for (uri, expected) in cases {
            let backend = Arc::new(MockBackend::default());
            let (status, _) = get(backend.clone(), uri, Some("test1:secret")).await;

            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(backend.calls(), vec![("search term".to_string(), expected)], "{uri}");
        }
    }

    #[tokio::test]
    async fn test_validation_errors_skip_backend() {
        let cases = [
            ("/v1/products", "missing query parameter"),
            ("/v1/products?q=", "missing query parameter"),
            ("/v1/products?q=search+term&from=abc&size=123", "malformed from parameter"),
            ("/v1/products?q=search+term&from=-1&size=123", "malformed from parameter"),
            ("/v1/products?q=search+term&from=11&size=abc", "malformed size parameter"),
            ("/v1/products?q=search+term&from=11&size=-1", "malformed size parameter"),
        ];

        for (uri, message) in cases {
            let backend = Arc::new(MockBackend::default());
            let (status, body) = get(backend.clone(), uri, Some("test1:secret")).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(
                body,
                json!({"status": "error", "code": 400, "error": message}),
                "{uri}"
            );
            assert!(backend.calls().is_empty(), "{uri} reached the backend");
        }
    }

    #[tokio::test]
    async fn test_backend_error_is_not_leaked() {
        let backend = Arc::new(MockBackend::failing());

        let (status, body) = get(backend.clone(), "/v1/products?q=search+term", Some("test1:secret")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"status": "error", "code": 500, "error": "Internal Server Error"})
        );
        assert!(!body.to_string().contains(MockBackend::FAILURE));
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_search_requires_credentials() {
        let backend = Arc::new(MockBackend::default());

        let (status, body) = get(backend.clone(), "/v1/products?q=search+term", None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"status": "error", "code": 401, "error": "Unauthorized"}));
        assert!(backend.calls().is_empty());
    }

    /// Sets its flag when dropped
    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    /// Searcher whose calls never complete
    #[derive(Default)]
    struct StalledBackend {
        started: AtomicBool,
        aborted: Arc<AtomicBool>,
    }

    #[async_trait]
    impl Searcher for StalledBackend {
        async fn search(&self, _query: &str, _opts: &SearchOptions) -> Result<Vec<Value>> {
            let _in_flight = DropFlag(self.aborted.clone());
            self.started.store(true, Ordering::SeqCst);
            std::future::pending().await
        }
    }

    #[async_trait]
    impl HealthProbe for StalledBackend {
        async fn probe(&self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_abandoned_request_cancels_backend_search() {
        let backend = Arc::new(StalledBackend::default());
        let app = build_router(
            AppState::with_backends(backend.clone(), backend.clone()),
            &ServerConfig::default(),
        );
        let request = Request::builder()
            .uri("/v1/products?q=search+term")
            .header(AUTHORIZATION, format!("Basic {}", STANDARD.encode("test1:secret")))
            .body(Body::empty())
            .unwrap();

        let outcome = tokio::time::timeout(Duration::from_millis(50), app.oneshot(request)).await;

        assert!(outcome.is_err(), "stalled search should not produce a response");
        assert!(backend.started.load(Ordering::SeqCst));
        assert!(backend.aborted.load(Ordering::SeqCst));
    }
}
