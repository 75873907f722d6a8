/*!
 * Unit tests for SRT rendering
 */

use autocap::exporter::{format_timestamp, render_srt, write_srt_file};
use autocap::timeline::{CaptionChunk, CaptionTimeline};

use crate::common::create_temp_dir;

#[test]
fn test_renderSrt_timeRange_shouldMatchSrtFormat() {
    let timeline = CaptionTimeline::from_chunks(vec![CaptionChunk::new("words", 61.234, 62.0)]);

    let srt = render_srt(&timeline);

    assert!(srt.contains("00:01:01,234 --> 00:01:02,000"));
}

#[test]
fn test_formatTimestamp_shouldFloorEachComponent() {
    assert_eq!(format_timestamp(3_599_999), "00:59:59,999");
    assert_eq!(format_timestamp(3_600_000), "01:00:00,000");
    assert_eq!(format_timestamp(45), "00:00:00,045");
}

#[test]
fn test_renderSrt_shouldNumberBlocksFromOne() {
    let timeline = CaptionTimeline::from_chunks(vec![
        CaptionChunk::new("first", 0.0, 1.0),
        CaptionChunk::new("second", 1.0, 2.0),
        CaptionChunk::new("third", 2.0, 3.0),
    ]);

    let srt = render_srt(&timeline);
    let lines: Vec<&str> = srt.lines().collect();

    assert_eq!(lines[0], "1");
    assert_eq!(lines[4], "2");
    assert_eq!(lines[8], "3");
}

#[test]
fn test_renderSrt_blocks_shouldBeSeparatedByBlankLines() {
    let timeline = CaptionTimeline::from_chunks(vec![
        CaptionChunk::new("hi", 0.0, 1.2),
        CaptionChunk::new("there", 1.2, 2.6),
    ]);

    let srt = render_srt(&timeline);

    let expected = "1\n00:00:00,000 --> 00:00:01,200\nhi\n\n\
                    2\n00:00:01,200 --> 00:00:02,600\nthere\n\n";
    assert_eq!(srt, expected);
}

#[test]
fn test_renderSrt_withEmptyTimeline_shouldProduceEmptyString() {
    assert_eq!(render_srt(&CaptionTimeline::new()), "");
}

#[test]
fn test_renderSrt_isDeterministic() {
    let timeline = CaptionTimeline::from_chunks(vec![CaptionChunk::new("stable", 0.5, 1.5)]);

    assert_eq!(render_srt(&timeline), render_srt(&timeline));
}

#[test]
fn test_writeSrtFile_shouldWriteUtf8Content() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("out.srt");

    let timeline = CaptionTimeline::from_chunks(vec![CaptionChunk::new("héllo wörld", 0.0, 1.0)]);
    write_srt_file(&timeline, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("héllo wörld"));
    assert!(content.starts_with("1\n"));
}
