//! HTTP server configuration

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

/// Path of the search endpoint
pub const SEARCH_PATH: &str = "/v1/products";

/// Path of the health endpoint
pub const HEALTH_PATH: &str = "/health";

/// Characters with a meaning in router path patterns
const ROUTE_SYNTAX: &[char] = &[':', '*', '{', '}'];

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Path serving the HTML search form
    #[serde(default = "default_index_path")]
    pub index_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            index_path: default_index_path(),
        }
    }
}

impl ServerConfig {
    /// Set listen address
    pub fn with_listen(mut self, listen: SocketAddr) -> Self {
        self.listen = listen;
        self
    }

    /// Set the path of the search form
    pub fn with_index_path(mut self, path: impl Into<String>) -> Self {
        self.index_path = path.into();
        self
    }

    /// Check that the configured paths can be routed
    pub fn validate(&self) -> Result<(), String> {
        if !self.index_path.starts_with('/') {
            return Err(format!("index path {:?} must start with '/'", self.index_path));
        }
        if self.index_path == SEARCH_PATH || self.index_path == HEALTH_PATH {
            return Err(format!("index path {:?} is reserved", self.index_path));
        }
        if let Some(c) = self.index_path.chars().find(|c| ROUTE_SYNTAX.contains(c)) {
            return Err(format!(
                "index path {:?} must be a literal path, found {c:?}",
                self.index_path
            ));
        }
        Ok(())
    }
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_index_path() -> String {
    "/".to_string()
}
