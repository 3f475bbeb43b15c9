//! Recurring snapshot fetch task.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::snapshot::GameSnapshot;

/// The game client's local live-data endpoint (self-signed certificate).
pub const DEFAULT_ENDPOINT: &str = "https://127.0.0.1:2999/liveclientdata/allgamedata";

/// Hard deadline on one fetch so a stalled request cannot delay later ticks.
const REQUEST_TIMEOUT: Duration = Duration::from_millis(1500);

/// Fetches one snapshot per interval and forwards it to the event loop.
///
/// There is no backoff and no retry logic: an unreachable endpoint is the
/// normal state outside a match, so every failure is a debug-level skip and
/// the next tick tries again.
pub struct TelemetryPoller {
    client: reqwest::Client,
    endpoint: String,
    interval: Duration,
}

impl TelemetryPoller {
    pub fn new(endpoint: impl Into<String>, interval: Duration) -> Result<Self, reqwest::Error> {
        // The endpoint lives on 127.0.0.1 with a self-signed certificate, so
        // certificate validation is off for this client only.
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            interval,
        })
    }

    /// Run until shutdown is signalled or the receiving side goes away.
    pub async fn run(
        self,
        snapshots: mpsc::Sender<GameSnapshot>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(endpoint = %self.endpoint, "telemetry poller started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.fetch().await {
                        Ok(snapshot) => {
                            if snapshots.send(snapshot).await.is_err() {
                                // Event loop is gone; nothing left to feed.
                                break;
                            }
                        }
                        Err(e) => debug!("telemetry fetch skipped: {e}"),
                    }
                }
                _ = shutdown.changed() => break,
            }
        }

        info!("telemetry poller stopped");
    }

    async fn fetch(&self) -> Result<GameSnapshot, FetchError> {
        let response = self.client.get(&self.endpoint).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        Ok(response.json().await?)
    }
}

/// Why a poll cycle produced no snapshot.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("non-success status {0}")]
    Status(StatusCode),
}
