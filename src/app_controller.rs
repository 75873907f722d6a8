use anyhow::{anyhow, Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::Config;
use crate::errors::TranscodeError;
use crate::file_utils::FileManager;
use crate::media::{MediaAsset, MediaKind, Transcoder};
use crate::providers::whisper::WhisperClient;
use crate::providers::TranscriptionProvider;
use crate::services::{ProjectsClient, RateLimitClient, StatsClient};
use crate::timeline::{normalize, CaptionTimeline};
use crate::validation::{timeline_issues, validate_upload, UploadLimits};

// @module: Pipeline controller for caption generation

/// Watchdog ceiling for one engine invocation; transcoding time scales
/// with video length and the engine itself applies no timeout
const TRANSCODE_WATCHDOG_SECS: u64 = 120;

/// Result of one successful pipeline run
#[derive(Debug)]
pub struct PipelineOutcome {
    /// The normalized caption timeline
    pub timeline: CaptionTimeline,
    /// Video duration in seconds, as probed
    pub video_duration: f64,
    /// Wall-clock seconds from audio extraction to normalized timeline
    pub processing_time_secs: f64,
    /// Project record id, when a backend collaborator is configured
    pub project_id: Option<String>,
}

/// Main application controller for the caption pipeline.
///
/// Stages run strictly in sequence (each stage's output is fully
/// materialized before the next begins) and every stage is fail-stop:
/// an error leaves the system as it was before that stage started.
/// Dropping the returned future abandons any in-flight engine or network
/// call; nothing external is written before the final project creation.
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Shared transcoding engine handle, reused across runs
    transcoder: Transcoder,
    // @field: Transcription service client
    provider: Arc<dyn TranscriptionProvider>,
}

impl Controller {
    // @method: Create a controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let provider: Arc<dyn TranscriptionProvider> = Arc::new(WhisperClient::with_timeout(
            config.provider.effective_api_key(),
            config.provider.endpoint.clone(),
            config.provider.model.clone(),
            Duration::from_secs(config.provider.timeout_secs),
        ));
        Ok(Self::with_provider(config, provider))
    }

    /// Create a controller with an explicit provider (used by tests)
    pub fn with_provider(config: Config, provider: Arc<dyn TranscriptionProvider>) -> Self {
        let transcoder = Transcoder::new().with_burn_style(config.export.burn_style());
        Self {
            config,
            transcoder,
            provider,
        }
    }

    /// The shared transcoding engine handle
    pub fn transcoder(&self) -> &Transcoder {
        &self.transcoder
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline for one video file
    pub async fn run(&self, input_file: &Path) -> Result<PipelineOutcome> {
        let multi_progress = MultiProgress::new();
        self.run_with_progress(input_file, &multi_progress).await
    }

    async fn run_with_progress(
        &self,
        input_file: &Path,
        multi_progress: &MultiProgress,
    ) -> Result<PipelineOutcome> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let file_name = input_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| anyhow!("Input path has no file name: {:?}", input_file))?;

        let video = MediaAsset::new(
            FileManager::read_bytes(input_file)?,
            MediaKind::Video,
            file_name,
        );

        let limits = UploadLimits {
            max_duration_secs: self.config.limits.max_duration_secs,
            max_file_size_bytes: self.config.limits.max_file_size_bytes,
        };

        // File type and size are rejected before the engine touches the
        // bytes; the duration ceiling needs a probe first
        validate_upload(&video, 0.0, &limits)?;

        let video_duration = self
            .with_watchdog(self.transcoder.probe_duration(&video))
            .await
            .context("Could not probe video duration")?;
        debug!("Probed duration: {:.1}s", video_duration);

        validate_upload(&video, video_duration, &limits)?;

        // Quota gate comes before the transcoding stage, not after, so an
        // exhausted limit never wastes a conversion
        if self.config.backend.enabled() {
            let rate_limit = RateLimitClient::new(
                self.config.backend.rate_limit_endpoint(),
                self.config.backend.timeout_secs,
            );
            rate_limit.gate().await?;
        }

        let started = std::time::Instant::now();

        let extract_pb = stage_spinner(multi_progress, "Extracting audio");
        let audio = self
            .with_watchdog(self.transcoder.extract_audio(&video))
            .await?;
        extract_pb.finish_with_message(format!(
            "Audio extracted: {} ({} bytes)",
            audio.file_name,
            audio.size()
        ));

        let transcribe_pb = stage_spinner(multi_progress, "Transcribing");
        // One attempt; the provider's own client timeout bounds the call
        let segments = self.provider.transcribe(&audio).await?;
        transcribe_pb.finish_with_message(format!(
            "Transcription received: {} segment(s)",
            segments.len()
        ));

        let timeline = normalize(segments);
        for issue in timeline_issues(&timeline) {
            warn!("Timeline issue after normalization: {}", issue);
        }

        let processing_time_secs = started.elapsed().as_secs_f64();
        info!(
            "Transcription completed in {:.2}s ({} caption(s))",
            processing_time_secs,
            timeline.len()
        );

        let project_id = if self.config.backend.enabled() {
            self.persist_project(&video, &audio, video_duration, &timeline, processing_time_secs)
                .await?
        } else {
            None
        };

        if self.config.backend.enabled() {
            let stats = StatsClient::new(
                self.config.backend.stats_endpoint(),
                self.config.backend.timeout_secs,
            );
            stats.report_duration(video_duration).await;
        }

        Ok(PipelineOutcome {
            timeline,
            video_duration,
            processing_time_secs,
            project_id,
        })
    }

    /// Create the project record for a completed run
    async fn persist_project(
        &self,
        video: &MediaAsset,
        audio: &MediaAsset,
        video_duration: f64,
        timeline: &CaptionTimeline,
        processing_time_secs: f64,
    ) -> Result<Option<String>> {
        let projects = ProjectsClient::new(
            self.config.backend.projects_endpoint(),
            self.config.backend.timeout_secs,
        );

        let project = crate::services::projects::ProjectCreate {
            video_file_name: video.file_name.clone(),
            video_file_size: video.size(),
            video_file_duration: video_duration,
            audio_file_name: audio.file_name.clone(),
            audio_file_size: audio.size(),
            transcription: timeline.to_json()?,
            processing_time: processing_time_secs,
        };

        let id = projects.create(&project).await?;
        Ok(Some(id))
    }

    /// Apply the transcoding watchdog to an engine future
    async fn with_watchdog<T>(
        &self,
        fut: impl std::future::Future<Output = Result<T, TranscodeError>>,
    ) -> Result<T> {
        match tokio::time::timeout(Duration::from_secs(TRANSCODE_WATCHDOG_SECS), fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(TranscodeError::Timeout(TRANSCODE_WATCHDOG_SECS).into()),
        }
    }
}

/// Spinner for one pipeline stage
fn stage_spinner(multi_progress: &MultiProgress, message: &str) -> ProgressBar {
    let pb = multi_progress.add(ProgressBar::new_spinner());
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
