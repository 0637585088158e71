//! Application state for the API server

use std::{sync::Arc, time::Instant};

use essearch_storage::{ElasticsearchClient, HealthProbe, Searcher};

/// Application state shared across all API handlers
#[derive(Clone)]
pub struct AppState {
    /// Backend used by the search endpoint
    pub searcher: Arc<dyn Searcher>,
    /// Backend liveness check used by the health endpoint
    pub health: Arc<dyn HealthProbe>,
    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    /// State backed by a dialed Elasticsearch client
    pub fn new(client: Arc<ElasticsearchClient>) -> Self {
        Self::with_backends(client.clone(), client)
    }

    /// State with explicit backends, i.e. test doubles
    pub fn with_backends(searcher: Arc<dyn Searcher>, health: Arc<dyn HealthProbe>) -> Self {
        Self {
            searcher,
            health,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
