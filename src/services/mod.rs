/*!
 * External collaborator clients.
 *
 * The surrounding web application owns persistence, quotas, and stats;
 * the pipeline talks to it through three small HTTP contracts:
 * - `rate_limit`: quota check + attempt recording, gating each run
 * - `projects`: project creation and transcription updates
 * - `stats`: total-seconds-processed aggregation
 *
 * Every client is optional: an unset backend URL in the configuration
 * disables the collaborator and the pipeline runs standalone.
 */

pub mod projects;
pub mod rate_limit;
pub mod stats;

pub use projects::ProjectsClient;
pub use rate_limit::{QuotaStatus, RateLimitClient};
pub use stats::StatsClient;

use reqwest::Client;
use std::time::Duration;

/// Build the HTTP client shared by the collaborator contracts
pub(crate) fn http_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_default()
}
