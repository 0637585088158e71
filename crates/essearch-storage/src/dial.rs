//! Startup dialing: wait for the cluster to answer before serving traffic

use std::time::Duration;

use tokio::time::{interval_at, sleep_until, timeout_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::{
    client::{ElasticsearchClient, HealthProbe},
    config::StorageConfig,
    error::{Result, StorageError},
};

/// Delay between two health probes while dialing
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Build a client for the configured nodes and wait until the cluster
/// answers, retrying for at most `config.dial_timeout`.
pub async fn connect(config: StorageConfig) -> Result<ElasticsearchClient> {
    let client = ElasticsearchClient::new(config)?;
    dial(&client, client.config().dial_timeout).await?;

    info!("Connected to Elasticsearch cluster ({} nodes)", client.nodes().len());
    Ok(client)
}

/// Probe the backend until it answers.
///
/// Without a deadline a single probe is made and its error returned as is.
/// With a deadline the probe is repeated every [`POLL_INTERVAL`] until it
/// succeeds or the deadline passes, in which case
/// [`StorageError::DeadlineExceeded`] is returned. Every probe failure is
/// retried, including 4xx statuses and undecodable bodies, since a proxy in
/// front of a starting cluster can answer with either. A probe still in
/// flight when the deadline passes is abandoned.
pub async fn dial<P>(probe: &P, deadline: Option<Duration>) -> Result<()>
where
    P: HealthProbe + ?Sized,
{
    let started = Instant::now();
    let Some(timeout) = deadline else {
        return probe.probe().await;
    };
    let deadline_at = started + timeout;

    let mut attempt: u32 = 1;
    let mut ticker = interval_at(started + POLL_INTERVAL, POLL_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        match timeout_at(deadline_at, probe.probe()).await {
            Ok(Ok(())) => {
                if attempt > 1 {
                    debug!("Cluster answered after {attempt} attempts");
                }
                return Ok(());
            }
            Ok(Err(e)) => {
                let left = deadline_at.saturating_duration_since(Instant::now());
                if e.is_retryable() {
                    warn!("Cluster not reachable (attempt {attempt}, {left:?} left): {e}");
                } else {
                    warn!("Cluster answered unexpectedly (attempt {attempt}, {left:?} left): {e}");
                }
            }
            Err(_) => return Err(StorageError::DeadlineExceeded(timeout)),
        }

        tokio::select! {
            biased;
            _ = sleep_until(deadline_at) => return Err(StorageError::DeadlineExceeded(timeout)),
            _ = ticker.tick() => {}
        }
        attempt += 1;
    }
}
