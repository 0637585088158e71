//! Test doubles shared by handler tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header::AUTHORIZATION, Request, StatusCode},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use essearch_storage::{HealthProbe, Result, SearchOptions, Searcher, StorageError};
use serde_json::Value;
use tower::ServiceExt;

use crate::{config::ServerConfig, routes::build_router, state::AppState};

/// Backend that records searches and answers with canned results
#[derive(Default)]
pub struct MockBackend {
    results: Vec<Value>,
    fail: bool,
    calls: Mutex<Vec<(String, SearchOptions)>>,
}

impl MockBackend {
    pub const FAILURE: &'static str = "node es-3 at 10.0.0.3 rejected the query";

    pub fn with_results(results: Vec<Value>) -> Self {
        Self {
            results,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, SearchOptions)> {
        self.calls.lock().unwrap().clone()
    }

    fn failure() -> StorageError {
        StorageError::HttpStatus {
            status: essearch_storage::StatusCode::SERVICE_UNAVAILABLE,
            message: Self::FAILURE.to_string(),
        }
    }
}

#[async_trait]
impl Searcher for MockBackend {
    async fn search(&self, query: &str, opts: &SearchOptions) -> Result<Vec<Value>> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), opts.clone()));

        if self.fail {
            return Err(Self::failure());
        }
        Ok(self.results.clone())
    }
}

#[async_trait]
impl HealthProbe for MockBackend {
    async fn probe(&self) -> Result<()> {
        if self.fail {
            return Err(Self::failure());
        }
        Ok(())
    }
}

/// Send a GET through the full router, optionally with Basic credentials
/// (`user:password`), and return the status with the JSON body
pub async fn get(backend: Arc<MockBackend>, uri: &str, credentials: Option<&str>) -> (StatusCode, Value) {
    let app = build_router(
        AppState::with_backends(backend.clone(), backend),
        &ServerConfig::default(),
    );

    let mut request = Request::builder().uri(uri);
    if let Some(credentials) = credentials {
        request = request.header(AUTHORIZATION, format!("Basic {}", STANDARD.encode(credentials)));
    }

    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, serde_json::from_slice(&body).unwrap())
}
