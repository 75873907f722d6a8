/*!
 * Media transcoding.
 *
 * Wraps the ffmpeg/ffprobe engine for the two conversions the pipeline
 * needs: extracting an audio asset from an uploaded video, and muxing or
 * burning a subtitle track back into the video on export.
 *
 * Each invocation runs in a private scratch directory standing in for the
 * engine's per-run virtual filesystem; every intermediate file written
 * there is removed before the call returns, on success and failure alike,
 * so repeated exports in one session do not accumulate state.
 *
 * No watchdog lives in this module: transcoding time scales with video
 * length, and the caller owns the timeout policy.
 */

use bytes::Bytes;
use log::{debug, info};
use tempfile::TempDir;
use tokio::process::Command;

use crate::errors::TranscodeError;
use crate::file_utils::{get_file_extension, remove_file_extension};

/// MIME-ish tag for a media payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// A video container
    Video,
    /// An audio container
    Audio,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
        }
    }
}

/// An ephemeral media payload moving between pipeline stages.
///
/// Created by the transcoder, consumed by the next stage, then dropped,
/// never persisted as a domain entity.
#[derive(Debug, Clone)]
pub struct MediaAsset {
    /// Raw container bytes
    pub data: Bytes,
    /// Declared payload kind
    pub kind: MediaKind,
    /// Format hint derived from the file extension, e.g. "mp4"
    pub format: String,
    /// Original file name, used to derive output names
    pub file_name: String,
}

impl MediaAsset {
    /// Create an asset from raw bytes and its originating file name
    pub fn new(data: impl Into<Bytes>, kind: MediaKind, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let format = get_file_extension(&file_name);
        Self {
            data: data.into(),
            kind,
            format,
            file_name,
        }
    }

    /// Payload size in bytes
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// File name without its extension
    pub fn stem(&self) -> String {
        remove_file_extension(&self.file_name)
    }
}

/// How a subtitle track is delivered in an exported video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbedMode {
    /// Mux the subtitles as a selectable `mov_text` stream, copying the
    /// picture and audio codecs. Fast and lossless; the default.
    #[default]
    SoftStream,
    /// Render the subtitles into the pixels with a filter overlay.
    /// Re-encodes the video stream; slower.
    HardBurn,
}

impl std::fmt::Display for EmbedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SoftStream => write!(f, "soft"),
            Self::HardBurn => write!(f, "hard"),
        }
    }
}

impl std::str::FromStr for EmbedMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "soft" => Ok(Self::SoftStream),
            "hard" => Ok(Self::HardBurn),
            _ => Err(anyhow::anyhow!("Invalid embed mode: {} (use soft|hard)", s)),
        }
    }
}

/// Handle to the shared transcoding engine.
///
/// Constructed once per session and passed into each pipeline run; holds
/// no per-run state of its own.
#[derive(Debug, Clone)]
pub struct Transcoder {
    /// Subtitle style applied in hard-burn mode
    burn_style: String,
}

impl Transcoder {
    /// Create a transcoder with the default burn style
    pub fn new() -> Self {
        Self {
            burn_style: "FontSize=24,FontName=Arial".to_string(),
        }
    }

    /// Override the force_style string used for hard-burned subtitles
    pub fn with_burn_style(mut self, style: impl Into<String>) -> Self {
        self.burn_style = style.into();
        self
    }

    /// Convert a video asset into an mp3 audio asset.
    ///
    /// The caller enforces the duration ceiling before invoking this; the
    /// conversion itself accepts any playable video. A non-zero engine
    /// exit invalidates any partial output.
    pub async fn extract_audio(&self, video: &MediaAsset) -> Result<MediaAsset, TranscodeError> {
        let scratch = Scratch::new()?;

        let input_name = format!("input.{}", video.format);
        let output_name = "output.mp3";
        scratch.write(&input_name, &video.data).await?;

        info!("Extracting audio from {}", video.file_name);
        run_engine(
            "ffmpeg",
            &["-i", &input_name, output_name],
            scratch.path(),
        )
        .await?;

        let data = scratch.read(output_name).await?;
        scratch.discard()?;

        Ok(MediaAsset::new(
            data,
            MediaKind::Audio,
            format!("{}.mp3", video.stem()),
        ))
    }

    /// Mux or burn a subtitle track into a video asset.
    ///
    /// Soft mode copies every existing stream and attaches the subtitles
    /// as a `mov_text` text track; hard mode re-encodes the picture with a
    /// subtitle filter overlay and copies the audio.
    pub async fn embed_subtitles(
        &self,
        video: &MediaAsset,
        subtitle_text: &str,
        mode: EmbedMode,
    ) -> Result<MediaAsset, TranscodeError> {
        let scratch = Scratch::new()?;

        scratch.write("input.mp4", &video.data).await?;
        scratch.write("subtitles.srt", subtitle_text.as_bytes()).await?;

        info!("Embedding subtitles into {} ({} mode)", video.file_name, mode);
        match mode {
            EmbedMode::SoftStream => {
                run_engine(
                    "ffmpeg",
                    &[
                        "-i", "input.mp4",
                        "-i", "subtitles.srt",
                        "-c", "copy",
                        "-c:s", "mov_text",
                        "output.mp4",
                    ],
                    scratch.path(),
                )
                .await?;
            }
            EmbedMode::HardBurn => {
                let filter = format!("subtitles=subtitles.srt:force_style='{}'", self.burn_style);
                run_engine(
                    "ffmpeg",
                    &["-i", "input.mp4", "-vf", &filter, "-c:a", "copy", "output.mp4"],
                    scratch.path(),
                )
                .await?;
            }
        }

        let data = scratch.read("output.mp4").await?;
        scratch.discard()?;

        Ok(MediaAsset::new(
            data,
            MediaKind::Video,
            format!("captioned_{}", video.file_name),
        ))
    }

    /// Probe the duration of a media asset in seconds via ffprobe
    pub async fn probe_duration(&self, asset: &MediaAsset) -> Result<f64, TranscodeError> {
        let scratch = Scratch::new()?;

        let input_name = format!("input.{}", asset.format);
        scratch.write(&input_name, &asset.data).await?;

        let stdout = run_engine(
            "ffprobe",
            &[
                "-v", "quiet",
                "-print_format", "json",
                "-show_format",
                &input_name,
            ],
            scratch.path(),
        )
        .await?;
        scratch.discard()?;

        let json: serde_json::Value = serde_json::from_slice(&stdout).map_err(|e| {
            TranscodeError::EngineFailed {
                stderr: format!("unparseable ffprobe output: {}", e),
            }
        })?;

        json["format"]["duration"]
            .as_str()
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| TranscodeError::NoOutput(asset.file_name.clone()))
    }
}

impl Default for Transcoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Private per-invocation workspace for engine intermediates
struct Scratch {
    dir: TempDir,
}

impl Scratch {
    fn new() -> Result<Self, TranscodeError> {
        let dir = TempDir::new().map_err(|e| TranscodeError::EngineFailed {
            stderr: format!("failed to create scratch directory: {}", e),
        })?;
        Ok(Self { dir })
    }

    fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    async fn write(&self, name: &str, data: &[u8]) -> Result<(), TranscodeError> {
        tokio::fs::write(self.dir.path().join(name), data)
            .await
            .map_err(|e| TranscodeError::EngineFailed {
                stderr: format!("failed to stage {}: {}", name, e),
            })
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, TranscodeError> {
        let path = self.dir.path().join(name);
        let data = tokio::fs::read(&path)
            .await
            .map_err(|_| TranscodeError::NoOutput(name.to_string()))?;
        if data.is_empty() {
            return Err(TranscodeError::NoOutput(name.to_string()));
        }
        Ok(data)
    }

    /// Delete every intermediate file now rather than at drop time
    fn discard(self) -> Result<(), TranscodeError> {
        self.dir.close().map_err(|e| TranscodeError::EngineFailed {
            stderr: format!("failed to clean scratch directory: {}", e),
        })
    }
}

/// Run an engine binary inside the scratch directory and return stdout
async fn run_engine(
    program: &str,
    args: &[&str],
    working_dir: &std::path::Path,
) -> Result<Vec<u8>, TranscodeError> {
    debug!("{} {}", program, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .output()
        .await
        .map_err(|e| TranscodeError::EngineMissing(format!("{}: {}", program, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(TranscodeError::EngineFailed {
            stderr: filter_engine_stderr(&stderr),
        });
    }

    Ok(output.stdout)
}

/// Filter ffmpeg stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
fn filter_engine_stderr(stderr: &str) -> String {
    let dominated_prefixes = [
        "ffmpeg version",
        "ffprobe version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "  Metadata:",
        "  Duration:",
        "  Stream #",
        "      Metadata:",
        "Output #",
        "Stream mapping:",
        "Press [q]",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !dominated_prefixes.iter().any(|p| line.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown engine error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
