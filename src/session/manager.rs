use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, error, info};
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::errors::EditError;
use crate::timeline::{set_boundary, CaptionTimeline};

use super::models::{CaptionsDocument, EditCommand, TimelineSink};

/// Quiet period after the last edit before a persistence write goes out
const DEFAULT_QUIET_PERIOD_MS: u64 = 1_000;

/// Debounced persistence scheduler.
///
/// Owns all timer state so the editor stays pure. Each scheduled write
/// replaces (aborts) any pending one, which both coalesces bursts of
/// edits into a single write and guarantees a later edit's write is never
/// overtaken by an earlier one still waiting.
pub struct Debouncer {
    sink: Arc<dyn TimelineSink>,
    quiet_period: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Create a debouncer with the default 1-second quiet period
    pub fn new(sink: Arc<dyn TimelineSink>) -> Self {
        Self::with_quiet_period(sink, Duration::from_millis(DEFAULT_QUIET_PERIOD_MS))
    }

    /// Create a debouncer with a custom quiet period
    pub fn with_quiet_period(sink: Arc<dyn TimelineSink>, quiet_period: Duration) -> Self {
        Self {
            sink,
            quiet_period,
            pending: Mutex::new(None),
        }
    }

    /// Schedule a write of this state after the quiet period, superseding
    /// any write already scheduled
    pub fn schedule(&self, document: CaptionsDocument) {
        let sink = Arc::clone(&self.sink);
        let quiet_period = self.quiet_period;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            if let Err(e) = sink.persist(&document).await {
                error!("Debounced persistence failed: {}", e);
            }
        });

        let mut pending = self.pending.lock();
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
            debug!("Superseded pending persistence write");
        }
    }

    /// Cancel any pending write and persist this state immediately
    pub async fn flush(&self, document: &CaptionsDocument) -> Result<()> {
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }
        self.sink
            .persist(document)
            .await
            .context("Failed to flush timeline state")
    }

    /// Whether a write is currently scheduled and not yet fired
    pub fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .map_or(false, |h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.lock().take() {
            pending.abort();
        }
    }
}

/// Editing session for one video's caption timeline.
///
/// Exclusively owns the timeline state; every change goes through the
/// validated editor operation and a rejected edit leaves the state
/// untouched. Successful edits schedule a debounced persistence write of
/// the whole captions document.
pub struct EditingSession {
    document: CaptionsDocument,
    debouncer: Debouncer,
}

impl EditingSession {
    /// Open a session over a captions document
    pub fn new(document: CaptionsDocument, debouncer: Debouncer) -> Self {
        Self {
            document,
            debouncer,
        }
    }

    /// The current timeline state
    pub fn timeline(&self) -> &CaptionTimeline {
        &self.document.timeline
    }

    /// The current captions document
    pub fn document(&self) -> &CaptionsDocument {
        &self.document
    }

    /// Apply one bounded edit.
    ///
    /// On success the session's timeline advances to the new state and a
    /// persistence write is scheduled; on rejection nothing changes.
    pub fn apply(&mut self, command: EditCommand) -> Result<(), EditError> {
        let updated = set_boundary(
            &self.document.timeline,
            command.index,
            command.boundary,
            command.value,
            self.document.track_duration,
        )?;

        info!(
            "Caption {} {} set to {:.1}s",
            command.index, command.boundary, command.value
        );

        self.document.timeline = updated;
        self.debouncer.schedule(self.document.clone());

        Ok(())
    }

    /// Force any pending write out now; call before the session ends
    pub async fn flush(&self) -> Result<()> {
        self.debouncer.flush(&self.document).await
    }
}
