use anyhow::{anyhow, Result};
use log::warn;
use reqwest::Client;
use serde::Serialize;

/// Duration report sent after each successful run
#[derive(Debug, Serialize)]
struct DurationReport {
    duration: f64,
}

/// Client for the stats aggregation collaborator.
///
/// Best-effort: the aggregate is not required for pipeline correctness,
/// so reporting failures are logged and swallowed.
#[derive(Debug)]
pub struct StatsClient {
    client: Client,
    endpoint: String,
}

impl StatsClient {
    /// Create a client for the given stats endpoint
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: super::http_client(timeout_secs),
            endpoint: endpoint.into(),
        }
    }

    /// Report seconds of video processed; never fails the caller
    pub async fn report_duration(&self, duration_secs: f64) {
        if let Err(e) = self.try_report(duration_secs).await {
            warn!("Stats reporting failed (ignored): {}", e);
        }
    }

    async fn try_report(&self, duration_secs: f64) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&DurationReport {
                duration: duration_secs,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("status {}", status));
        }
        Ok(())
    }
}
