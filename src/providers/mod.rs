/*!
 * Transcription provider implementations.
 *
 * This module contains the client-side contract for external
 * speech-recognition services and the implementations shipped with the
 * application:
 * - Whisper: HuggingFace-inference-style HTTP endpoint
 * - Mock: scripted behaviors for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::TranscriptionError;
use crate::media::MediaAsset;
use crate::timeline::RawSegment;

/// Common trait for speech-to-text services.
///
/// Implementations perform exactly one attempt per call and never retry;
/// retry policy, if any, belongs to the caller, which can branch on
/// [`TranscriptionError::is_transient`].
#[async_trait]
pub trait TranscriptionProvider: Send + Sync + Debug {
    /// Transcribe an audio asset into the service's raw segment list,
    /// returned unmodified; ordering and overlap repair is the
    /// normalizer's job, not the client's.
    async fn transcribe(&self, audio: &MediaAsset) -> Result<Vec<RawSegment>, TranscriptionError>;

    /// Short provider name for logging
    fn name(&self) -> &str;
}

pub mod mock;
pub mod whisper;
