//! Cluster connection configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Elasticsearch cluster configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Node base URLs, i.e. `http://localhost:9200`
    #[serde(default)]
    pub nodes: Vec<String>,

    /// How long to keep dialing the cluster at startup (`None` = try once)
    #[serde(default)]
    pub dial_timeout: Option<Duration>,

    /// Per-request timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,

    /// Connection timeout
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: Duration,

    /// User agent sent to the cluster
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            dial_timeout: None,
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl StorageConfig {
    /// Create a config from a comma-separated node list such as
    /// `http://es1:9200,http://es2:9200`. Blank entries are dropped.
    pub fn from_node_list(list: &str) -> Self {
        Self {
            nodes: split_node_list(list),
            ..Default::default()
        }
    }

    /// Set the startup dial timeout. A zero duration disables retrying.
    pub fn with_dial_timeout(mut self, timeout: Duration) -> Self {
        self.dial_timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Split a comma-separated node list into trimmed, non-empty addresses
pub fn split_node_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|node| !node.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a duration written as a sequence of number/unit pairs, i.e. `300ms`,
/// `5s` or `1m30s`. Supported units are `ns`, `us`, `µs`, `ms`, `s`, `m`, `h`.
/// A bare `0` is accepted.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let s = input.trim();
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err("empty duration".to_string());
    }

    let mut total = 0f64;
    let mut rest = s;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(format!("invalid duration {input:?}"));
        }
        let value: f64 = rest[..number_len]
            .parse()
            .map_err(|_| format!("invalid duration {input:?}"))?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let nanos_per_unit = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            "" => return Err(format!("missing unit in duration {input:?}")),
            unit => return Err(format!("unknown unit {unit:?} in duration {input:?}")),
        };
        rest = &rest[unit_len..];
        total += value * nanos_per_unit;
    }

    Ok(Duration::from_nanos(total.round() as u64))
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    format!("essearch/{}", env!("CARGO_PKG_VERSION"))
}
