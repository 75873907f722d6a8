use anyhow::{anyhow, Result};
use log::{debug, info};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::errors::RateLimitExceeded;

/// Current quota as reported by the rate-limit collaborator
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct QuotaStatus {
    /// Runs remaining in the current window
    pub remaining: u32,
    /// Total runs allowed per window
    pub total: u32,
}

/// Rejection body for an exhausted quota
#[derive(Debug, Deserialize)]
struct RejectionBody {
    message: Option<String>,
}

/// Client for the rate-limit collaborator.
///
/// The window parameters are server-owned; this client only consumes the
/// `{remaining, total}` contract and surfaces the server's rejection
/// message verbatim.
#[derive(Debug)]
pub struct RateLimitClient {
    client: Client,
    endpoint: String,
}

impl RateLimitClient {
    /// Create a client for the given rate-limit endpoint
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: super::http_client(timeout_secs),
            endpoint: endpoint.into(),
        }
    }

    /// Fetch the current quota without consuming any of it
    pub async fn check(&self) -> Result<QuotaStatus> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| anyhow!("Rate limit check failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Rate limit check failed with status {}", status));
        }

        let quota: QuotaStatus = response
            .json()
            .await
            .map_err(|e| anyhow!("Unexpected rate limit response: {}", e))?;

        debug!("Quota: {}/{} remaining", quota.remaining, quota.total);
        Ok(quota)
    }

    /// Check the quota and record one attempt.
    ///
    /// Called before the transcoding stage starts so an exhausted quota
    /// never wastes work. A 429 from the collaborator becomes a
    /// [`RateLimitExceeded`] carrying the server's message and the quota
    /// read just before the attempt.
    pub async fn gate(&self) -> Result<QuotaStatus> {
        let quota = self.check().await?;

        let response = self
            .client
            .post(&self.endpoint)
            .send()
            .await
            .map_err(|e| anyhow!("Rate limit recording failed: {}", e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let message = response
                .json::<RejectionBody>()
                .await
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| "Rate limit exceeded".to_string());

            return Err(anyhow::Error::new(RateLimitExceeded {
                message,
                remaining: quota.remaining,
                total: quota.total,
            }));
        }

        if !status.is_success() {
            return Err(anyhow!(
                "Rate limit recording failed with status {}",
                status
            ));
        }

        info!(
            "Rate limit check passed ({}/{} remaining before this run)",
            quota.remaining, quota.total
        );
        Ok(quota)
    }
}
