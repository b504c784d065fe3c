//! Daily-journal engine: meaningfulness, streaks, task extraction, and carryover.
//!
//! Every computation re-reads notes through a [`NoteStore`]; nothing derived is
//! cached or persisted.

pub mod carryover;
pub mod clock;
pub mod service;
pub mod streak;
pub mod tasks;
pub mod template;

use chrono::NaiveDate;

use crate::store::NoteStore;

/// Read a note, treating read failures the same as a missing note.
///
/// The classifier and task extractor have no error path of their own; a note
/// that cannot be read contributes nothing.
pub(crate) fn read_or_absent(store: &dyn NoteStore, date: NaiveDate) -> Option<String> {
    match store.read_note(date) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(date = %date, error = %e, "note unreadable, treating as absent");
            None
        }
    }
}
