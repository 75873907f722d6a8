/*!
 * Error types for the autocap application.
 *
 * This module contains custom error types for different parts of the
 * pipeline, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised while validating an uploaded video before any work starts
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The file is not a recognized video container
    #[error("Invalid file type: {0} is not a video")]
    NotAVideo(String),

    /// The video is longer than the configured ceiling
    #[error("Video length {actual_secs:.1}s exceeds the {limit_secs}s limit")]
    DurationExceeded {
        /// Measured duration in seconds
        actual_secs: f64,
        /// Configured ceiling in seconds
        limit_secs: u64,
    },

    /// The file is larger than the configured ceiling
    #[error("File size {actual_bytes} exceeds the {limit_bytes} byte limit")]
    SizeExceeded {
        /// Measured size in bytes
        actual_bytes: u64,
        /// Configured ceiling in bytes
        limit_bytes: u64,
    },

    /// The file contains no data
    #[error("File is empty")]
    EmptyFile,
}

/// Errors raised by the media transcoding engine
#[derive(Error, Debug)]
pub enum TranscodeError {
    /// ffmpeg exited with a non-zero status; no partial output is valid
    #[error("Transcoding engine failed: {stderr}")]
    EngineFailed {
        /// Filtered stderr from the engine
        stderr: String,
    },

    /// ffmpeg or ffprobe could not be spawned at all
    #[error("Transcoding engine unavailable: {0}")]
    EngineMissing(String),

    /// The watchdog timeout fired before the engine finished
    #[error("Transcoding timed out after {0} seconds")]
    Timeout(u64),

    /// The engine reported success but wrote no usable output
    #[error("Transcoding produced no output for {0}")]
    NoOutput(String),
}

/// Errors raised by the transcription service client.
///
/// Callers branch on `is_transient` to decide whether a retry is sensible;
/// the client itself performs exactly one attempt per call.
#[derive(Error, Debug)]
pub enum TranscriptionError {
    /// Network failure or non-2xx response from the service
    #[error("Transcription service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The response body did not carry the expected segment list
    #[error("Malformed transcription response: {0}")]
    MalformedResponse(String),
}

impl TranscriptionError {
    /// Whether a caller could reasonably retry the same request
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ServiceUnavailable(_))
    }
}

/// The rate-limit collaborator rejected the run before any work began.
///
/// This is an expected condition, not a bug; the pipeline halts and the
/// user sees the remaining quota.
#[derive(Error, Debug)]
#[error("{message} ({remaining}/{total} remaining)")]
pub struct RateLimitExceeded {
    /// Human-readable message from the collaborator
    pub message: String,
    /// Remaining quota at the time of rejection
    pub remaining: u32,
    /// Total quota in the current window
    pub total: u32,
}

/// Errors raised when a timestamp edit fails validation.
///
/// The rules are checked in order and the first failure wins; a rejected
/// edit leaves the prior timeline state unchanged.
#[derive(Error, Debug, PartialEq)]
pub enum EditError {
    /// The chunk index does not exist in the timeline
    #[error("No caption at index {0}")]
    IndexOutOfRange(usize),

    /// The new value is NaN or infinite
    #[error("New boundary value is not a finite number")]
    NotFinite,

    /// The new value is below zero
    #[error("New boundary value {0} is negative")]
    NegativeTime(f64),

    /// The new value lies past the end of the underlying media
    #[error("New boundary value {value} is beyond the track end {track_duration}")]
    BeyondTrackEnd {
        /// Requested boundary in seconds
        value: f64,
        /// Track duration in seconds
        track_duration: f64,
    },

    /// A start edit must stay strictly before the chunk's own end
    #[error("Start {value} must be before this caption's end {end}")]
    StartNotBeforeEnd {
        /// Requested start in seconds
        value: f64,
        /// The chunk's current end
        end: f64,
    },

    /// A start edit may not reach back into the previous chunk
    #[error("Start {value} overlaps the previous caption ending at {prev_end}")]
    OverlapsPredecessor {
        /// Requested start in seconds
        value: f64,
        /// Previous chunk's end
        prev_end: f64,
    },

    /// An end edit must stay strictly after the chunk's own start
    #[error("End {value} must be after this caption's start {start}")]
    EndNotAfterStart {
        /// Requested end in seconds
        value: f64,
        /// The chunk's current start
        start: f64,
    },

    /// An end edit may not reach into the next chunk
    #[error("End {value} overlaps the next caption starting at {next_start}")]
    OverlapsSuccessor {
        /// Requested end in seconds
        value: f64,
        /// Next chunk's start
        next_start: f64,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error validating user input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Error from the transcoding engine
    #[error("Transcode error: {0}")]
    Transcode(#[from] TranscodeError),

    /// Error from the transcription service
    #[error("Transcription error: {0}")]
    Transcription(#[from] TranscriptionError),

    /// The rate limit collaborator rejected the run
    #[error("Rate limit exceeded: {0}")]
    RateLimit(#[from] RateLimitExceeded),

    /// A timestamp edit failed validation
    #[error("Edit rejected: {0}")]
    Edit(#[from] EditError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
