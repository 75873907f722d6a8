/*!
 * Unit tests for upload and timeline validation
 */

use autocap::errors::ValidationError;
use autocap::media::{MediaAsset, MediaKind};
use autocap::timeline::{CaptionChunk, CaptionTimeline};
use autocap::validation::{timeline_issues, validate_upload, TimelineIssue, UploadLimits};

fn video_asset(name: &str, bytes: usize) -> MediaAsset {
    MediaAsset::new(vec![0u8; bytes], MediaKind::Video, name)
}

#[test]
fn test_validateUpload_withValidVideo_shouldPass() {
    let asset = video_asset("clip.mp4", 1024);

    assert!(validate_upload(&asset, 120.0, &UploadLimits::default()).is_ok());
}

#[test]
fn test_validateUpload_withNonVideoExtension_shouldReject() {
    let asset = video_asset("song.mp3", 1024);

    let err = validate_upload(&asset, 10.0, &UploadLimits::default()).unwrap_err();
    assert!(matches!(err, ValidationError::NotAVideo(_)));
}

#[test]
fn test_validateUpload_withEmptyFile_shouldReject() {
    let asset = video_asset("clip.mp4", 0);

    let err = validate_upload(&asset, 10.0, &UploadLimits::default()).unwrap_err();
    assert!(matches!(err, ValidationError::EmptyFile));
}

#[test]
fn test_validateUpload_overDurationCeiling_shouldReject() {
    let asset = video_asset("clip.mp4", 1024);

    let err = validate_upload(&asset, 300.5, &UploadLimits::default()).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::DurationExceeded {
            limit_secs: 300,
            ..
        }
    ));
}

#[test]
fn test_validateUpload_atExactCeiling_shouldPass() {
    let asset = video_asset("clip.mp4", 1024);

    assert!(validate_upload(&asset, 300.0, &UploadLimits::default()).is_ok());
}

#[test]
fn test_validateUpload_overSizeCeiling_shouldReject() {
    let limits = UploadLimits {
        max_duration_secs: 300,
        max_file_size_bytes: 512,
    };
    let asset = video_asset("clip.mp4", 1024);

    let err = validate_upload(&asset, 10.0, &limits).unwrap_err();
    assert!(matches!(err, ValidationError::SizeExceeded { .. }));
}

#[test]
fn test_timelineIssues_withOverlap_shouldReportLaterChunk() {
    let timeline = CaptionTimeline::from_chunks(vec![
        CaptionChunk::new("a", 0.0, 2.0),
        CaptionChunk::new("b", 1.5, 3.0),
    ]);

    let issues = timeline_issues(&timeline);

    assert_eq!(issues.len(), 1);
    assert!(matches!(issues[0], TimelineIssue::Overlap { index: 1, .. }));
}

#[test]
fn test_timelineIssues_withEmptyTextAndInvertedBounds_shouldReportBoth() {
    let timeline = CaptionTimeline::from_chunks(vec![CaptionChunk::new("  ", 2.0, 2.0)]);

    let issues = timeline_issues(&timeline);

    assert!(issues.contains(&TimelineIssue::EmptyText { index: 0 }));
    assert!(issues.contains(&TimelineIssue::NonPositiveDuration { index: 0 }));
}

#[test]
fn test_timelineIssues_withEmptyTimeline_shouldBeEmpty() {
    assert!(timeline_issues(&CaptionTimeline::new()).is_empty());
}
