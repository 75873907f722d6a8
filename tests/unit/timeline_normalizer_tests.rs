/*!
 * Unit tests for the timeline normalizer
 */

use autocap::timeline::{normalize, RawSegment};

use crate::common::overlapping_segments;

#[test]
fn test_normalize_withEmptyList_shouldYieldEmptyTimelineWithoutError() {
    let timeline = normalize(Vec::new());

    assert!(timeline.is_empty());
    assert_eq!(timeline.len(), 0);
}

#[test]
fn test_normalize_withOverlappingSegments_shouldShiftPreservingDuration() {
    // "hi" [0, 1.2] and "there" [0.5, 1.9] overlap; the second segment
    // must start where the first ends and keep its 1.4s duration
    let timeline = normalize(overlapping_segments());

    assert_eq!(timeline.len(), 2);

    let first = &timeline.chunks()[0];
    assert_eq!(first.text, "hi");
    assert_eq!(first.start, 0.0);
    assert_eq!(first.end, 1.2);

    let second = &timeline.chunks()[1];
    assert_eq!(second.text, "there");
    assert_eq!(second.start, 1.2);
    assert_eq!(second.end, 2.6);
}

#[test]
fn test_normalize_withTimestampReset_shouldShiftForward() {
    // Later segments restarting near zero is the classic upstream failure
    let timeline = normalize(vec![
        RawSegment::new("first", 10.0, 12.0),
        RawSegment::new("second", 0.0, 2.0),
    ]);

    assert_eq!(timeline.chunks()[1].start, 12.0);
    assert_eq!(timeline.chunks()[1].end, 14.0);
}

#[test]
fn test_normalize_shouldAlwaysProduceMonotonicTimeline() {
    let messy = vec![
        RawSegment::new("a", 0.0, 3.0),
        RawSegment::new("b", 1.0, 2.0),
        RawSegment::new("c", 0.0, 5.0),
        RawSegment::new("d", 4.9, 6.0),
        RawSegment::new("e", 20.0, 21.0),
    ];

    let timeline = normalize(messy);

    for pair in timeline.chunks().windows(2) {
        assert!(
            pair[0].end <= pair[1].start,
            "overlap between {:?} and {:?}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_normalize_withShiftedSegment_shouldPreserveDurationWithinRounding() {
    let original_duration = 1.9 - 0.5;
    let timeline = normalize(overlapping_segments());

    let shifted = &timeline.chunks()[1];
    assert!((shifted.duration() - original_duration).abs() < 0.1 + f64::EPSILON);
}

#[test]
fn test_normalize_shouldRoundBoundsToOneDecimal() {
    let timeline = normalize(vec![RawSegment::new("a", 0.123, 1.987)]);

    assert_eq!(timeline.chunks()[0].start, 0.1);
    assert_eq!(timeline.chunks()[0].end, 2.0);
}

#[test]
fn test_normalize_withCleanInput_shouldNotTouchTimestamps() {
    let timeline = normalize(vec![
        RawSegment::new("a", 0.0, 1.5),
        RawSegment::new("b", 2.0, 3.5),
        RawSegment::new("c", 3.5, 4.0),
    ]);

    let starts: Vec<f64> = timeline.chunks().iter().map(|c| c.start).collect();
    assert_eq!(starts, vec![0.0, 2.0, 3.5]);
}

#[test]
fn test_normalize_shouldBeIdempotent() {
    let first_pass = normalize(overlapping_segments());
    let second_pass = normalize(first_pass.to_segments());

    assert_eq!(first_pass, second_pass);
}

#[test]
fn test_normalize_shouldNeverDropOrReorderSegments() {
    let segments = vec![
        RawSegment::new("one", 5.0, 6.0),
        RawSegment::new("two", 0.0, 0.5),
        RawSegment::new("three", 0.1, 0.4),
    ];

    let timeline = normalize(segments);

    let texts: Vec<&str> = timeline.chunks().iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
}
