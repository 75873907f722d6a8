use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::TranscriptionError;
use crate::media::MediaAsset;
use crate::providers::TranscriptionProvider;
use crate::timeline::RawSegment;

/// Whisper client for a HuggingFace-inference-style transcription endpoint
#[derive(Debug)]
pub struct WhisperClient {
    /// HTTP client for API requests
    client: Client,
    /// API key for bearer authentication
    api_key: String,
    /// Endpoint URL (optional, defaults to the public inference API)
    endpoint: String,
    /// Model identifier appended to the default endpoint
    model: String,
}

/// Whisper transcription request
#[derive(Debug, Serialize)]
struct WhisperRequest {
    /// Base64-encoded audio payload
    inputs: String,
    /// Generation parameters
    parameters: WhisperParameters,
}

/// Whisper request parameters
#[derive(Debug, Serialize)]
struct WhisperParameters {
    /// Ask the service for segment-level timestamps
    return_timestamps: bool,
}

/// Whisper transcription response
#[derive(Debug, Deserialize)]
struct WhisperResponse {
    /// Raw segment list; absent on malformed responses
    chunks: Option<Vec<WireChunk>>,
}

/// One segment as it appears on the wire.
///
/// The timestamp may be null or missing entirely; the shape is validated
/// here at the boundary rather than trusted inward.
#[derive(Debug, Deserialize)]
struct WireChunk {
    text: String,
    #[serde(default)]
    timestamp: Option<(f64, f64)>,
}

impl WhisperClient {
    /// Default request timeout; transcription of a short video takes tens
    /// of seconds at most
    const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Create a new Whisper client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self::with_timeout(
            api_key,
            endpoint,
            model,
            Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a new Whisper client with a custom request timeout
    pub fn with_timeout(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    fn api_url(&self) -> String {
        if self.endpoint.is_empty() {
            format!(
                "https://api-inference.huggingface.co/models/{}",
                self.model
            )
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        }
    }
}

#[async_trait]
impl TranscriptionProvider for WhisperClient {
    async fn transcribe(&self, audio: &MediaAsset) -> Result<Vec<RawSegment>, TranscriptionError> {
        let request = WhisperRequest {
            inputs: BASE64.encode(&audio.data),
            parameters: WhisperParameters {
                return_timestamps: true,
            },
        };

        debug!(
            "Sending {} bytes of audio to {}",
            audio.size(),
            self.api_url()
        );

        let response = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                TranscriptionError::ServiceUnavailable(format!("request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error response".to_string());
            error!("Transcription service error ({}): {}", status, error_text);
            return Err(TranscriptionError::ServiceUnavailable(format!(
                "status {}: {}",
                status, error_text
            )));
        }

        let body: WhisperResponse = response.json().await.map_err(|e| {
            TranscriptionError::MalformedResponse(format!("unparseable body: {}", e))
        })?;

        let chunks = body.chunks.ok_or_else(|| {
            TranscriptionError::MalformedResponse("response is missing the chunks field".into())
        })?;

        Ok(chunks
            .into_iter()
            .map(|c| RawSegment {
                text: c.text,
                // A null timestamp is still a segment; the normalizer will
                // place it after the preceding one
                timestamp: c.timestamp.unwrap_or((0.0, 0.0)),
            })
            .collect())
    }

    fn name(&self) -> &str {
        "whisper"
    }
}
