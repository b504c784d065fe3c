//! Checkbox task extraction from note bodies.

use chrono::NaiveDate;
use serde::Serialize;

use crate::store::NoteStore;

const OPEN_MARKER: &str = "- [ ] ";
const DONE_MARKERS: [&str; 2] = ["- [x] ", "- [X] "];

/// Task texts found in one note, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskSet {
    pub uncompleted: Vec<String>,
    pub completed: Vec<String>,
}

/// Split a note body into uncompleted and completed task texts.
///
/// A task line starts with `- [ ] ` or `- [x] ` / `- [X] ` at column zero; the
/// text is everything after the marker. Other lines are ignored and
/// duplicates are kept.
pub fn parse_tasks(body: &str) -> TaskSet {
    let mut tasks = TaskSet::default();
    for line in body.lines() {
        if let Some(text) = line.strip_prefix(OPEN_MARKER) {
            tasks.uncompleted.push(text.to_string());
        } else if let Some(text) = DONE_MARKERS.iter().find_map(|m| line.strip_prefix(*m)) {
            tasks.completed.push(text.to_string());
        }
    }
    tasks
}

/// Tasks in the note for `date`; empty when there is no note.
pub fn extract_tasks(store: &dyn NoteStore, date: NaiveDate) -> TaskSet {
    super::read_or_absent(store, date)
        .map(|body| parse_tasks(&body))
        .unwrap_or_default()
}
