/*!
 * Subtitle export.
 *
 * Renders a caption timeline into SRT text and drives the transcoder's
 * embedding step for video export. Rendering is deterministic and
 * locale-independent; both paths take the timeline by reference at call
 * time so exports always reflect the current, possibly user-edited state.
 */

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use log::info;

use crate::errors::TranscodeError;
use crate::file_utils::FileManager;
use crate::media::{EmbedMode, MediaAsset, Transcoder};
use crate::timeline::CaptionTimeline;

/// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Convert floating-point seconds to whole milliseconds
fn seconds_to_ms(seconds: f64) -> u64 {
    (seconds.max(0.0) * 1000.0).round() as u64
}

/// Render a timeline as SRT text.
///
/// One block per chunk: 1-based sequence number, the
/// `HH:MM:SS,mmm --> HH:MM:SS,mmm` range, the text, and a blank separator
/// line. An empty timeline renders as an empty string.
pub fn render_srt(timeline: &CaptionTimeline) -> String {
    let mut out = String::new();

    for (index, chunk) in timeline.chunks().iter().enumerate() {
        let start = format_timestamp(seconds_to_ms(chunk.start));
        let end = format_timestamp(seconds_to_ms(chunk.end));
        let _ = writeln!(out, "{}", index + 1);
        let _ = writeln!(out, "{} --> {}", start, end);
        let _ = writeln!(out, "{}", chunk.text);
        let _ = writeln!(out);
    }

    out
}

/// Write the rendered SRT text to a file (UTF-8)
pub fn write_srt_file<P: AsRef<Path>>(timeline: &CaptionTimeline, path: P) -> Result<()> {
    let content = render_srt(timeline);
    FileManager::write_to_file(&path, &content)?;
    info!(
        "Wrote {} caption(s) to {:?}",
        timeline.len(),
        path.as_ref()
    );
    Ok(())
}

/// Export the video with the timeline embedded as a subtitle track.
///
/// The SRT content is rendered from the timeline as it stands right now
/// and handed to the transcoder; the result is a new video asset named
/// `captioned_<original file name>`.
pub async fn export_video(
    transcoder: &Transcoder,
    video: &MediaAsset,
    timeline: &CaptionTimeline,
    mode: EmbedMode,
) -> Result<MediaAsset, TranscodeError> {
    let srt = render_srt(timeline);
    transcoder.embed_subtitles(video, &srt, mode).await
}
