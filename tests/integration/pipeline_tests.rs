/*!
 * End-to-end caption pipeline tests, driven through the mock provider so
 * no media engine or network is needed
 */

use std::path::Path;
use std::sync::Arc;

use autocap::app_config::Config;
use autocap::app_controller::Controller;
use autocap::exporter::render_srt;
use autocap::media::{MediaAsset, MediaKind};
use autocap::providers::mock::MockTranscriber;
use autocap::providers::TranscriptionProvider;
use autocap::timeline::normalize;
use autocap::validation::timeline_issues;

use crate::common::overlapping_segments;

#[tokio::test]
async fn test_pipeline_fromRawSegmentsToSrt_shouldRepairAndRender() {
    // Transcription stage: the mock service returns overlapping segments
    let provider = MockTranscriber::working(overlapping_segments());
    let audio = MediaAsset::new(vec![0u8; 16], MediaKind::Audio, "clip.mp3");
    let segments = provider.transcribe(&audio).await.unwrap();

    // Normalization stage
    let timeline = normalize(segments);
    assert!(timeline_issues(&timeline).is_empty());
    assert_eq!(timeline.chunks()[0].start, 0.0);
    assert_eq!(timeline.chunks()[0].end, 1.2);
    assert_eq!(timeline.chunks()[1].start, 1.2);
    assert_eq!(timeline.chunks()[1].end, 2.6);

    // Export stage
    let srt = render_srt(&timeline);
    assert!(srt.contains("00:00:00,000 --> 00:00:01,200"));
    assert!(srt.contains("00:00:01,200 --> 00:00:02,600"));
    assert!(srt.contains("hi"));
    assert!(srt.contains("there"));
}

#[tokio::test]
async fn test_pipeline_withEmptyTranscription_shouldYieldEmptyArtifacts() {
    let provider = MockTranscriber::working(vec![]);
    let audio = MediaAsset::new(vec![0u8; 16], MediaKind::Audio, "clip.mp3");

    let segments = provider.transcribe(&audio).await.unwrap();
    let timeline = normalize(segments);

    assert!(timeline.is_empty());
    assert_eq!(render_srt(&timeline), "");
}

#[tokio::test]
async fn test_pipeline_transcriptionFailure_shouldLetCallerBranchOnKind() {
    let audio = MediaAsset::new(vec![0u8; 16], MediaKind::Audio, "clip.mp3");

    let transient = MockTranscriber::unavailable()
        .transcribe(&audio)
        .await
        .unwrap_err();
    let permanent = MockTranscriber::malformed()
        .transcribe(&audio)
        .await
        .unwrap_err();

    assert!(transient.is_transient());
    assert!(!permanent.is_transient());
}

#[tokio::test]
async fn test_controller_withMissingInput_shouldFailBeforeAnyStage() {
    let provider = Arc::new(MockTranscriber::working(vec![]));
    let controller = Controller::with_provider(Config::default(), provider.clone());

    let result = controller.run(Path::new("/no/such/video.mp4")).await;

    assert!(result.is_err());
    // The transcription stage never ran
    assert_eq!(provider.call_count(), 0);
}
