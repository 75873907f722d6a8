/*!
 * # autocap - AI-powered video caption generator
 *
 * A Rust library for generating, editing and exporting video captions
 * from automatic speech recognition.
 *
 * ## Features
 *
 * - Extract audio from video files with ffmpeg
 * - Transcribe audio through an external speech-recognition endpoint
 * - Repair raw service timestamps into a strictly ordered,
 *   non-overlapping caption timeline
 * - Apply bounded, validated timestamp edits with debounced persistence
 * - Export SRT subtitle files or videos with soft-embedded or
 *   hard-burned subtitle tracks
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `media`: Media assets and the ffmpeg transcoding engine
 * - `timeline`: Caption timeline types, normalization and editing
 * - `exporter`: SRT rendering and export paths
 * - `session`: Editing sessions and debounced persistence
 * - `providers`: Transcription service clients
 * - `services`: External collaborator clients (rate limit, projects, stats)
 * - `app_controller`: The sequential pipeline driver
 * - `validation`: Upload and timeline checks
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod exporter;
pub mod file_utils;
pub mod media;
pub mod providers;
pub mod services;
pub mod session;
pub mod timeline;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, PipelineOutcome};
pub use errors::{
    AppError, EditError, RateLimitExceeded, TranscodeError, TranscriptionError, ValidationError,
};
pub use media::{EmbedMode, MediaAsset, MediaKind, Transcoder};
pub use session::{CaptionsDocument, Debouncer, EditCommand, EditingSession};
pub use timeline::{normalize, set_boundary, Boundary, CaptionChunk, CaptionTimeline, RawSegment};
