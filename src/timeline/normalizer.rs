/*!
 * Timeline normalization.
 *
 * Upstream services frequently produce timestamps that restart near zero
 * for later segments or overlap slightly due to model windowing. The
 * normalizer repairs a raw segment list into a strictly ordered,
 * non-overlapping timeline in one left-to-right pass, preserving each
 * segment's reported duration and original order, and discarding nothing.
 */

use log::warn;

use super::{round_tenths, CaptionChunk, CaptionTimeline, RawSegment};

/// Repair an untrusted segment list into a valid caption timeline.
///
/// Single O(n) pass: a segment whose reported start precedes the end of
/// the previous corrected segment is shifted forward to start exactly
/// there, keeping its duration; all other segments pass through untouched.
/// Both bounds are rounded to 0.1 s before storing. Re-running the pass on
/// its own output is a no-op, and an empty input yields an empty timeline.
pub fn normalize(segments: Vec<RawSegment>) -> CaptionTimeline {
    let mut last_end = 0.0_f64;

    let chunks = segments
        .into_iter()
        .enumerate()
        .map(|(index, segment)| {
            let (mut start, mut end) = segment.timestamp;

            // Overlap or timestamp reset: shift forward, keep the duration
            if start < last_end {
                let duration = end - start;
                start = last_end;
                end = start + duration;
            }

            last_end = end;

            if end <= start {
                // Upstream contract assumes positive durations; pass such
                // segments through unchanged but make them observable
                warn!(
                    "Segment {} has non-positive duration after correction ({:.3}s -> {:.3}s)",
                    index, start, end
                );
            }

            CaptionChunk {
                text: segment.text,
                start: round_tenths(start),
                end: round_tenths(end),
            }
        })
        .collect();

    CaptionTimeline::from_chunks(chunks)
}
