/*!
 * Caption timeline types.
 *
 * A timeline is the ordered, non-overlapping sequence of caption chunks
 * for one video. Raw segments arrive from the transcription service with
 * untrusted timestamps and are repaired into a timeline by the normalizer;
 * afterwards the timeline only changes through validated editor operations.
 */

use serde::{Deserialize, Serialize};

pub mod editor;
pub mod normalizer;

pub use editor::{set_boundary, Boundary};
pub use normalizer::normalize;

/// One span of transcribed speech as reported by the transcription service.
///
/// Timestamps are not trusted: they may restart from zero, overlap the
/// previous segment, or be otherwise inconsistent. The wire shape is the
/// service's own: `{"text": ..., "timestamp": [start, end]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSegment {
    /// Transcribed text for this span
    pub text: String,
    /// Reported (start, end) in floating-point seconds
    pub timestamp: (f64, f64),
}

impl RawSegment {
    /// Create a raw segment from text and a reported time range
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            timestamp: (start, end),
        }
    }
}

/// The atomic unit of a caption timeline: non-empty text with a
/// `0 <= start < end` time range in seconds.
///
/// Serialized with the same wire shape as [`RawSegment`] so persisted
/// transcriptions stay compatible with the upstream service schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ChunkWire", into = "ChunkWire")]
pub struct CaptionChunk {
    /// Caption text
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

/// Wire representation shared with the transcription service
#[derive(Serialize, Deserialize)]
struct ChunkWire {
    text: String,
    timestamp: (f64, f64),
}

impl From<ChunkWire> for CaptionChunk {
    fn from(wire: ChunkWire) -> Self {
        Self {
            text: wire.text,
            start: wire.timestamp.0,
            end: wire.timestamp.1,
        }
    }
}

impl From<CaptionChunk> for ChunkWire {
    fn from(chunk: CaptionChunk) -> Self {
        Self {
            text: chunk.text,
            timestamp: (chunk.start, chunk.end),
        }
    }
}

impl CaptionChunk {
    /// Create a caption chunk
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Duration of this chunk in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Round a time value to one decimal place (0.1-second resolution)
pub(crate) fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// The full caption track for one video: an ordered sequence of chunks
/// where `chunks[i].end <= chunks[i+1].start` for every adjacent pair.
///
/// Value-like: editor operations return a new timeline state and never
/// mutate shared history. Persisted as `{"chunks": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptionTimeline {
    chunks: Vec<CaptionChunk>,
}

impl CaptionTimeline {
    /// Create an empty timeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a timeline from chunks the caller asserts are ordered
    pub fn from_chunks(chunks: Vec<CaptionChunk>) -> Self {
        Self { chunks }
    }

    /// The chunks, in display order
    pub fn chunks(&self) -> &[CaptionChunk] {
        &self.chunks
    }

    /// Number of chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the timeline has no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunk at `index`, if it exists
    pub fn get(&self, index: usize) -> Option<&CaptionChunk> {
        self.chunks.get(index)
    }

    /// Whether every adjacent pair satisfies `end <= next.start`
    pub fn is_monotonic(&self) -> bool {
        self.chunks
            .windows(2)
            .all(|pair| pair[0].end <= pair[1].start)
    }

    /// End of the last chunk, or 0.0 for an empty timeline
    pub fn last_end(&self) -> f64 {
        self.chunks.last().map_or(0.0, |c| c.end)
    }

    /// View the timeline chunks as raw segments, e.g. to re-run the
    /// normalizer over an already-normalized track
    pub fn to_segments(&self) -> Vec<RawSegment> {
        self.chunks
            .iter()
            .map(|c| RawSegment::new(c.text.clone(), c.start, c.end))
            .collect()
    }

    /// Serialize to the persisted JSON document shape
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a timeline from the persisted JSON document shape
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
