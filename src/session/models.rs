use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::file_utils::FileManager;
use crate::services::ProjectsClient;
use crate::timeline::{Boundary, CaptionTimeline};

/// One bounded edit: move a boundary of the chunk at `index` to `value`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditCommand {
    /// Target chunk index (0-based)
    pub index: usize,
    /// Which boundary to move
    pub boundary: Boundary,
    /// New time value in seconds
    pub value: f64,
}

impl std::str::FromStr for EditCommand {
    type Err = anyhow::Error;

    /// Parse the CLI form `INDEX:start=SECONDS` / `INDEX:end=SECONDS`
    fn from_str(s: &str) -> Result<Self> {
        let (target, value) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid edit '{}' (expected INDEX:start|end=SECONDS)", s))?;
        let (index, boundary) = target
            .split_once(':')
            .ok_or_else(|| anyhow!("Invalid edit '{}' (expected INDEX:start|end=SECONDS)", s))?;

        Ok(Self {
            index: index
                .trim()
                .parse()
                .with_context(|| format!("Invalid chunk index in edit '{}'", s))?,
            boundary: boundary.trim().parse()?,
            value: value
                .trim()
                .parse()
                .with_context(|| format!("Invalid seconds value in edit '{}'", s))?,
        })
    }
}

/// The captions file written next to the source video.
///
/// Carries the timeline plus the context an editing session needs later:
/// the probed track duration (boundary edits validate against it) and the
/// backend project id when one was created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionsDocument {
    /// Backend project record id, when the run was persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Duration of the underlying media in seconds
    pub track_duration: f64,

    /// The caption timeline
    #[serde(flatten)]
    pub timeline: CaptionTimeline,
}

impl CaptionsDocument {
    /// Create a document for a freshly normalized timeline
    pub fn new(timeline: CaptionTimeline, track_duration: f64, project_id: Option<String>) -> Self {
        Self {
            project_id,
            track_duration,
            timeline,
        }
    }

    /// Serialize to the persisted JSON shape
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load a document from a captions file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = FileManager::read_to_string(&path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse captions file: {:?}", path.as_ref()))
    }

    /// Write the document to a captions file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_to_file(path, &self.to_json()?)
    }
}

/// Destination for persisted timeline state.
///
/// The session hands the current captions document to the sink; each sink
/// decides what part of it the collaborator receives.
#[async_trait]
pub trait TimelineSink: Send + Sync {
    /// Persist the current state
    async fn persist(&self, document: &CaptionsDocument) -> Result<()>;
}

/// Sink writing the full document to a local captions file
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink targeting the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TimelineSink for FileSink {
    async fn persist(&self, document: &CaptionsDocument) -> Result<()> {
        document.save(&self.path)
    }
}

/// Sink updating a persisted project's transcription, and mirroring the
/// full document to the local captions file.
///
/// The backend receives the same `{"chunks": ...}` transcription shape
/// the project was created with.
pub struct ProjectSink {
    client: Arc<ProjectsClient>,
    project_id: String,
    local: FileSink,
}

impl ProjectSink {
    /// Create a sink targeting an existing project record
    pub fn new(
        client: Arc<ProjectsClient>,
        project_id: impl Into<String>,
        local_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            client,
            project_id: project_id.into(),
            local: FileSink::new(local_path),
        }
    }
}

#[async_trait]
impl TimelineSink for ProjectSink {
    async fn persist(&self, document: &CaptionsDocument) -> Result<()> {
        self.local.persist(document).await?;
        let transcription = document.timeline.to_json()?;
        self.client
            .update_transcription(&self.project_id, &transcription)
            .await
    }
}
