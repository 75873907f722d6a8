/*!
 * Timeline editing.
 *
 * One bounded operation: move the start or end boundary of a single chunk
 * to a new time value, validated against the chunk itself, its neighbors,
 * and the overall track duration. The editor is pure (no I/O, no timers)
 * and never auto-adjusts neighboring chunks to resolve a conflict;
 * conflicting edits are rejected back to the caller.
 */

use crate::errors::EditError;

use super::{round_tenths, CaptionTimeline};

/// Which boundary of a chunk an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// The chunk's start time
    Start,
    /// The chunk's end time
    End,
}

impl std::fmt::Display for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::End => write!(f, "end"),
        }
    }
}

impl std::str::FromStr for Boundary {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            _ => Err(anyhow::anyhow!("Invalid boundary: {} (use start|end)", s)),
        }
    }
}

/// Move one boundary of the chunk at `index` to `new_value` seconds.
///
/// The validation rules run in order and the first failure wins:
///
/// 1. `new_value` must be finite and non-negative
/// 2. `new_value` must not exceed `track_duration`
/// 3. a start must stay strictly before the chunk's own end
/// 4. a start must not reach back past the previous chunk's end
/// 5. an end must stay strictly after the chunk's own start
/// 6. an end must not reach past the next chunk's start
///
/// On success the chunk's bounds are rounded to 0.1 s and a new timeline
/// is returned; every other chunk is untouched (localized O(1) edit, not a
/// re-normalization pass). On failure the input timeline is unchanged.
pub fn set_boundary(
    timeline: &CaptionTimeline,
    index: usize,
    boundary: Boundary,
    new_value: f64,
    track_duration: f64,
) -> Result<CaptionTimeline, EditError> {
    let chunk = timeline
        .get(index)
        .ok_or(EditError::IndexOutOfRange(index))?;

    if !new_value.is_finite() {
        return Err(EditError::NotFinite);
    }
    if new_value < 0.0 {
        return Err(EditError::NegativeTime(new_value));
    }
    if new_value > track_duration {
        return Err(EditError::BeyondTrackEnd {
            value: new_value,
            track_duration,
        });
    }

    match boundary {
        Boundary::Start => {
            if new_value >= chunk.end {
                return Err(EditError::StartNotBeforeEnd {
                    value: new_value,
                    end: chunk.end,
                });
            }
            if index > 0 {
                let prev_end = timeline.chunks()[index - 1].end;
                if new_value < prev_end {
                    return Err(EditError::OverlapsPredecessor {
                        value: new_value,
                        prev_end,
                    });
                }
            }
        }
        Boundary::End => {
            if new_value <= chunk.start {
                return Err(EditError::EndNotAfterStart {
                    value: new_value,
                    start: chunk.start,
                });
            }
            if index < timeline.len() - 1 {
                let next_start = timeline.chunks()[index + 1].start;
                if new_value > next_start {
                    return Err(EditError::OverlapsSuccessor {
                        value: new_value,
                        next_start,
                    });
                }
            }
        }
    }

    let mut chunks = timeline.chunks().to_vec();
    let edited = &mut chunks[index];
    match boundary {
        Boundary::Start => edited.start = new_value,
        Boundary::End => edited.end = new_value,
    }
    edited.start = round_tenths(edited.start);
    edited.end = round_tenths(edited.end);

    Ok(CaptionTimeline::from_chunks(chunks))
}
