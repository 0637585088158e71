//! Elasticsearch access layer for essearch
//!
//! Connects to an Elasticsearch cluster and runs Lucene query-string searches
//! against it on behalf of the HTTP front-end.
//!
//! ## Features
//!
//! - **Startup dialing**: fixed-interval health polling bounded by a deadline
//! - **Trait-based design**: the API layer depends on `Searcher` and
//!   `HealthProbe`, so handlers can be tested without a cluster
//! - **Round robin**: requests rotate over all configured nodes
//! - **Testing support**: client tests run against wiremock nodes

pub mod client;
pub mod config;
pub mod dial;
pub mod error;
pub mod options;

pub use client::{ElasticsearchClient, HealthProbe, Searcher};
pub use config::{parse_duration, StorageConfig};
pub use dial::{connect, dial, POLL_INTERVAL};
pub use error::{Result, StorageError};
pub use options::SearchOptions;

/// Re-export commonly used types
pub use reqwest::StatusCode;
