use anyhow::{anyhow, Result};
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Payload for creating a project record after a successful run.
///
/// Field names follow the collaborator's schema; the transcription is the
/// serialized timeline document, not the raw bytes of any media asset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreate {
    /// Original video file name
    pub video_file_name: String,
    /// Video size in bytes
    pub video_file_size: u64,
    /// Video duration in seconds
    pub video_file_duration: f64,
    /// Derived audio file name
    pub audio_file_name: String,
    /// Audio size in bytes
    pub audio_file_size: u64,
    /// Serialized caption timeline
    pub transcription: String,
    /// Wall-clock processing time in seconds
    pub processing_time: f64,
}

/// Create response; the collaborator answers with the new record id
#[derive(Debug, Deserialize)]
struct CreateResponse {
    message: String,
}

/// Update payload for a transcription edit
#[derive(Debug, Serialize)]
struct TranscriptionUpdate<'a> {
    transcription: &'a str,
}

/// Client for the project persistence collaborator.
///
/// Only two operations exist on this side of the contract: create after a
/// successful pipeline run, and update-transcription after edits. Schema
/// ownership is external.
#[derive(Debug)]
pub struct ProjectsClient {
    client: Client,
    endpoint: String,
}

impl ProjectsClient {
    /// Create a client for the given projects endpoint
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: super::http_client(timeout_secs),
            endpoint: endpoint.into(),
        }
    }

    /// Create a project record and return its id
    pub async fn create(&self, project: &ProjectCreate) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(project)
            .send()
            .await
            .map_err(|e| anyhow!("Project creation failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Project creation failed with status {}", status));
        }

        let body: CreateResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Unexpected project creation response: {}", e))?;

        info!("Project created: {}", body.message);
        Ok(body.message)
    }

    /// Replace the stored transcription for an existing project
    pub async fn update_transcription(&self, project_id: &str, transcription: &str) -> Result<()> {
        let url = format!("{}/{}", self.endpoint.trim_end_matches('/'), project_id);

        let response = self
            .client
            .patch(&url)
            .json(&TranscriptionUpdate { transcription })
            .send()
            .await
            .map_err(|e| anyhow!("Project update failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Project update failed with status {}", status));
        }

        debug!("Project {} transcription updated", project_id);
        Ok(())
    }
}
