/*!
 * Edit-then-export workflow tests: a captions document is edited through
 * a session, persisted, reloaded, and exported from its current state
 */

use std::sync::Arc;
use std::time::Duration;

use autocap::exporter::render_srt;
use autocap::session::{
    CaptionsDocument, Debouncer, EditCommand, EditingSession, FileSink,
};
use autocap::timeline::{Boundary, CaptionChunk, CaptionTimeline};

use crate::common::create_temp_dir;

fn sample_document(project_id: Option<String>) -> CaptionsDocument {
    CaptionsDocument::new(
        CaptionTimeline::from_chunks(vec![
            CaptionChunk::new("hi", 0.0, 1.2),
            CaptionChunk::new("there", 1.2, 2.6),
        ]),
        30.0,
        project_id,
    )
}

#[test]
fn test_captionsDocument_saveAndLoad_shouldRoundTrip() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("clip.captions.json");

    let document = sample_document(Some("proj-42".to_string()));
    document.save(&path).unwrap();

    let loaded = CaptionsDocument::load(&path).unwrap();

    assert_eq!(loaded.project_id.as_deref(), Some("proj-42"));
    assert_eq!(loaded.track_duration, 30.0);
    assert_eq!(loaded.timeline, document.timeline);
}

#[test]
fn test_captionsDocument_withoutProject_shouldOmitProjectIdField() {
    let json = sample_document(None).to_json().unwrap();

    assert!(!json.contains("projectId"));
    assert!(json.contains("trackDuration"));
    assert!(json.contains("chunks"));
}

#[tokio::test(start_paused = true)]
async fn test_editWorkflow_shouldPersistEditedStateToDisk() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("clip.captions.json");

    let sink = Arc::new(FileSink::new(&path));
    let mut session = EditingSession::new(
        sample_document(None),
        Debouncer::with_quiet_period(sink, Duration::from_millis(1_000)),
    );

    session
        .apply(EditCommand {
            index: 1,
            boundary: Boundary::End,
            value: 3.0,
        })
        .unwrap();
    session.flush().await.unwrap();

    let persisted = CaptionsDocument::load(&path).unwrap();
    assert_eq!(persisted.timeline.chunks()[1].end, 3.0);
}

#[tokio::test(start_paused = true)]
async fn test_exportAfterEdit_shouldUseCurrentTimelineState() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("clip.captions.json");

    let sink = Arc::new(FileSink::new(&path));
    let mut session = EditingSession::new(
        sample_document(None),
        Debouncer::with_quiet_period(sink, Duration::from_millis(1_000)),
    );

    // The stale timeline would render 00:00:02,600 here
    session
        .apply(EditCommand {
            index: 1,
            boundary: Boundary::End,
            value: 3.0,
        })
        .unwrap();

    let srt = render_srt(session.timeline());

    assert!(srt.contains("00:00:01,200 --> 00:00:03,000"));
    assert!(!srt.contains("00:00:02,600"));
}
