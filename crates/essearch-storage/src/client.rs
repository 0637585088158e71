//! Elasticsearch HTTP client

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::Response;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{
    config::StorageConfig,
    error::{Result, StorageError},
    options::SearchOptions,
};

/// Anything that can run a search and return matching documents.
///
/// Dropping the returned future aborts the in-flight backend call, which is
/// how request cancellation propagates.
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Run `query` with `opts`, returning the source documents of the hits in
    /// the order the backend ranked them
    async fn search(&self, query: &str, opts: &SearchOptions) -> Result<Vec<Value>>;
}

/// Lightweight liveness call against the backend
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Succeeds when the backend answered the info call
    async fn probe(&self) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Hits,
}

#[derive(Debug, Default, Deserialize)]
struct Hits {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source", default)]
    source: Value,
}

/// Client for an Elasticsearch cluster. Requests rotate over the configured
/// nodes in round-robin order.
pub struct ElasticsearchClient {
    inner: reqwest::Client,
    nodes: Vec<Url>,
    next: AtomicUsize,
    config: StorageConfig,
}

impl ElasticsearchClient {
    /// Create a client for the configured nodes. No network calls are made;
    /// an empty or malformed node list fails here.
    pub fn new(config: StorageConfig) -> Result<Self> {
        if config.nodes.is_empty() {
            return Err(StorageError::NoNodes);
        }

        let nodes = config
            .nodes
            .iter()
            .map(|address| parse_node(address))
            .collect::<Result<Vec<_>>>()?;

        let inner = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| StorageError::BuildError(e.to_string()))?;

        Ok(Self {
            inner,
            nodes,
            next: AtomicUsize::new(0),
            config,
        })
    }

    /// Get configuration
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Parsed node addresses
    pub fn nodes(&self) -> &[Url] {
        &self.nodes
    }

    /// Fetch the cluster info document from the next node
    pub async fn info(&self) -> Result<Value> {
        let url = endpoint(self.next_node(), "");
        debug!("Elasticsearch info: {}", url);

        let response = ensure_success(self.inner.get(url).send().await?).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn next_node(&self) -> &Url {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.nodes.len();
        &self.nodes[idx]
    }
}

#[async_trait]
impl Searcher for ElasticsearchClient {
    async fn search(&self, query: &str, opts: &SearchOptions) -> Result<Vec<Value>> {
        let mut url = endpoint(self.next_node(), "_search");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", &opts.compose_query(query));
            for (name, value) in opts.query_params() {
                pairs.append_pair(name, &value);
            }
        }
        debug!("Elasticsearch search: {}", url);

        let response = ensure_success(self.inner.get(url).send().await?).await?;
        let body = response.bytes().await?;
        let parsed: SearchResponse = serde_json::from_slice(&body)?;

        Ok(parsed.hits.hits.into_iter().map(|hit| hit.source).collect())
    }
}

#[async_trait]
impl HealthProbe for ElasticsearchClient {
    async fn probe(&self) -> Result<()> {
        self.info().await.map(|_| ())
    }
}

fn parse_node(address: &str) -> Result<Url> {
    let invalid = |reason: String| StorageError::InvalidUrl {
        address: address.to_string(),
        reason,
    };

    let url = Url::parse(address).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        "http" | "https" => Err(invalid("missing host".to_string())),
        scheme => Err(invalid(format!("unsupported scheme {scheme:?}"))),
    }
}

/// Resolve `path` under the node URL, keeping any path prefix the node has
fn endpoint(node: &Url, path: &str) -> Url {
    let mut url = node.clone();
    let prefix = node.path().trim_end_matches('/');
    url.set_path(&format!("{prefix}/{path}"));
    url.set_query(None);
    url
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(StorageError::HttpStatus {
        status,
        message: response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string()),
    })
}
