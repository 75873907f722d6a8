/*!
 * Input validation.
 *
 * Upload checks run before any transcoding work starts; the timeline
 * check is a diagnostic sweep over an existing track used after
 * normalization and in tests.
 */

use crate::errors::ValidationError;
use crate::file_utils::is_video_extension;
use crate::media::{MediaAsset, MediaKind};
use crate::timeline::CaptionTimeline;

/// Ceilings applied to an uploaded video
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    /// Maximum video length in seconds
    pub max_duration_secs: u64,
    /// Maximum file size in bytes
    pub max_file_size_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_duration_secs: 300,
            max_file_size_bytes: 50 * 1024 * 1024,
        }
    }
}

/// Validate an uploaded video against the configured ceilings.
///
/// `duration_secs` comes from the caller's probe; measuring it is not
/// this module's job.
pub fn validate_upload(
    asset: &MediaAsset,
    duration_secs: f64,
    limits: &UploadLimits,
) -> Result<(), ValidationError> {
    if asset.kind != MediaKind::Video || !is_video_extension(&asset.format) {
        return Err(ValidationError::NotAVideo(asset.file_name.clone()));
    }

    if asset.data.is_empty() {
        return Err(ValidationError::EmptyFile);
    }

    if asset.size() > limits.max_file_size_bytes {
        return Err(ValidationError::SizeExceeded {
            actual_bytes: asset.size(),
            limit_bytes: limits.max_file_size_bytes,
        });
    }

    if duration_secs > limits.max_duration_secs as f64 {
        return Err(ValidationError::DurationExceeded {
            actual_secs: duration_secs,
            limit_secs: limits.max_duration_secs,
        });
    }

    Ok(())
}

/// A problem found while sweeping a timeline
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineIssue {
    /// Chunk overlaps its predecessor
    Overlap {
        /// Index of the later chunk
        index: usize,
        /// Overlap in seconds
        overlap_secs: f64,
    },
    /// Chunk has `end <= start`
    NonPositiveDuration {
        /// Index of the chunk
        index: usize,
    },
    /// Chunk has no text
    EmptyText {
        /// Index of the chunk
        index: usize,
    },
}

impl std::fmt::Display for TimelineIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overlap {
                index,
                overlap_secs,
            } => {
                write!(f, "caption {} overlaps previous by {:.1}s", index, overlap_secs)
            }
            Self::NonPositiveDuration { index } => {
                write!(f, "caption {} has non-positive duration", index)
            }
            Self::EmptyText { index } => write!(f, "caption {} has empty text", index),
        }
    }
}

/// Sweep a timeline for ordering and content problems
pub fn timeline_issues(timeline: &CaptionTimeline) -> Vec<TimelineIssue> {
    let mut issues = Vec::new();

    for (index, chunk) in timeline.chunks().iter().enumerate() {
        if chunk.text.trim().is_empty() {
            issues.push(TimelineIssue::EmptyText { index });
        }
        if chunk.end <= chunk.start {
            issues.push(TimelineIssue::NonPositiveDuration { index });
        }
        if index > 0 {
            let prev_end = timeline.chunks()[index - 1].end;
            if chunk.start < prev_end {
                issues.push(TimelineIssue::Overlap {
                    index,
                    overlap_secs: prev_end - chunk.start,
                });
            }
        }
    }

    issues
}
