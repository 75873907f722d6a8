/*!
 * Mock transcription provider for testing.
 *
 * Behaviors:
 * - `MockTranscriber::working(segments)` - returns the scripted segments
 * - `MockTranscriber::unavailable()` - simulates a network/5xx failure
 * - `MockTranscriber::malformed()` - simulates a bad response shape
 * - `MockBehavior::Slow` - delays before answering, for timeout tests
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::TranscriptionError;
use crate::media::MediaAsset;
use crate::providers::TranscriptionProvider;
use crate::timeline::RawSegment;

/// Behavior mode for the mock transcriber
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return these segments
    Working(Vec<RawSegment>),
    /// Always fail as if the service were unreachable
    Unavailable,
    /// Always fail as if the response shape were wrong
    Malformed,
    /// Delay before returning the segments (for timeout testing)
    Slow {
        /// Delay before responding
        delay_ms: u64,
        /// Segments to return after the delay
        segments: Vec<RawSegment>,
    },
}

/// Mock provider for exercising the pipeline without a real service
#[derive(Debug)]
pub struct MockTranscriber {
    behavior: MockBehavior,
    call_count: Arc<AtomicUsize>,
}

impl MockTranscriber {
    /// Create a mock with the given behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A mock that always succeeds with the given segments
    pub fn working(segments: Vec<RawSegment>) -> Self {
        Self::new(MockBehavior::Working(segments))
    }

    /// A mock that always fails with a transient error
    pub fn unavailable() -> Self {
        Self::new(MockBehavior::Unavailable)
    }

    /// A mock that always fails with a permanent error
    pub fn malformed() -> Self {
        Self::new(MockBehavior::Malformed)
    }

    /// How many times transcribe() has been called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Shared handle to the call counter
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.call_count)
    }
}

#[async_trait]
impl TranscriptionProvider for MockTranscriber {
    async fn transcribe(&self, _audio: &MediaAsset) -> Result<Vec<RawSegment>, TranscriptionError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Working(segments) => Ok(segments.clone()),
            MockBehavior::Unavailable => Err(TranscriptionError::ServiceUnavailable(
                "mock: connection refused".into(),
            )),
            MockBehavior::Malformed => Err(TranscriptionError::MalformedResponse(
                "mock: response is missing the chunks field".into(),
            )),
            MockBehavior::Slow { delay_ms, segments } => {
                tokio::time::sleep(std::time::Duration::from_millis(*delay_ms)).await;
                Ok(segments.clone())
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
