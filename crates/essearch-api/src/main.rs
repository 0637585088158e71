//! essearch server entry point

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use essearch_api::{ApiServer, AppState, ServerConfig};
use essearch_storage::{connect, parse_duration, StorageConfig};
use tracing_subscriber::EnvFilter;

/// Authenticated search front-end for an Elasticsearch cluster
#[derive(Parser, Debug)]
#[command(name = "essearch", version)]
#[command(about = "HTTP front-end forwarding product searches to Elasticsearch")]
struct Args {
    /// Comma-separated list of Elasticsearch cluster nodes
    #[arg(long, env = "ELASTICSEARCH_NODES")]
    nodes: String,

    /// Elasticsearch cluster connection timeout (i.e. 500ms, 30s, 1m); 0 tries once
    #[arg(long, env = "ELASTICSEARCH_CONN_TIMEOUT", default_value = "0", value_parser = parse_duration)]
    timeout: Duration,

    /// Listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    listen: SocketAddr,

    /// Path of the HTML search form
    #[arg(long, env = "INDEX_PATH", default_value = "/")]
    index_path: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let server_config = ServerConfig::default()
        .with_listen(args.listen)
        .with_index_path(args.index_path);
    server_config.validate().map_err(anyhow::Error::msg)?;

    let storage_config = StorageConfig::from_node_list(&args.nodes).with_dial_timeout(args.timeout);
    tracing::info!(
        "Connecting to Elasticsearch at {} (timeout {:?})",
        storage_config.nodes.join(","),
        args.timeout
    );

    let client = connect(storage_config)
        .await
        .context("failed to connect to elasticsearch cluster")?;

    let state = AppState::new(Arc::new(client));
    ApiServer::new(server_config, state)
        .serve()
        .await
        .context("HTTP server failed")?;

    Ok(())
}
