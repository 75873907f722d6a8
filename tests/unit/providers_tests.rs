/*!
 * Unit tests for transcription providers
 */

use autocap::errors::TranscriptionError;
use autocap::media::{MediaAsset, MediaKind};
use autocap::providers::mock::MockTranscriber;
use autocap::providers::TranscriptionProvider;
use autocap::timeline::RawSegment;

fn audio_asset() -> MediaAsset {
    MediaAsset::new(vec![1u8, 2, 3], MediaKind::Audio, "clip.mp3")
}

#[tokio::test]
async fn test_mockTranscriber_working_shouldReturnScriptedSegments() {
    let segments = vec![
        RawSegment::new("hello", 0.0, 1.0),
        RawSegment::new("world", 1.0, 2.0),
    ];
    let provider = MockTranscriber::working(segments.clone());

    let result = provider.transcribe(&audio_asset()).await.unwrap();

    assert_eq!(result, segments);
}

#[tokio::test]
async fn test_mockTranscriber_shouldPerformExactlyOneAttemptPerCall() {
    let provider = MockTranscriber::working(vec![]);

    provider.transcribe(&audio_asset()).await.unwrap();
    provider.transcribe(&audio_asset()).await.unwrap();

    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_mockTranscriber_unavailable_shouldBeTransient() {
    let provider = MockTranscriber::unavailable();

    let err = provider.transcribe(&audio_asset()).await.unwrap_err();

    assert!(matches!(err, TranscriptionError::ServiceUnavailable(_)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_mockTranscriber_malformed_shouldBePermanent() {
    let provider = MockTranscriber::malformed();

    let err = provider.transcribe(&audio_asset()).await.unwrap_err();

    assert!(matches!(err, TranscriptionError::MalformedResponse(_)));
    assert!(!err.is_transient());
}

#[test]
fn test_rawSegment_shouldDeserializeServiceWireShape() {
    let json = r#"{"text": "hi there", "timestamp": [0.5, 1.9]}"#;

    let segment: RawSegment = serde_json::from_str(json).unwrap();

    assert_eq!(segment.text, "hi there");
    assert_eq!(segment.timestamp, (0.5, 1.9));
}
