/*!
 * Editing session management.
 *
 * A session owns the caption timeline for one video while the user nudges
 * timestamps. Edits flow through the pure timeline editor; the session
 * layers on what the editor must not know about: timers and persistence.
 * Rapid successive edits coalesce into a single write after a quiet
 * period, and a newer edit always supersedes a pending scheduled write so
 * writes can never reorder.
 */

pub mod manager;
pub mod models;

pub use manager::{Debouncer, EditingSession};
pub use models::{CaptionsDocument, EditCommand, FileSink, ProjectSink, TimelineSink};
