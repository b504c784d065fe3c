//! Unfinished-task carryover across a trailing window of days.
//!
//! Tasks are identified by their trimmed text. A task ticked off on any day in
//! the window is dropped from every day in the window. Among the rest, the most
//! recent day claims a duplicate and source order is kept within a day.

use chrono::{Days, NaiveDate};
use std::collections::HashSet;

use super::tasks::{extract_tasks, TaskSet};
use crate::config::ConfigSource;
use crate::store::NoteStore;

/// Prior days scanned for carryover, most recent first: `today-1` .. `today-window_days`.
pub fn window(today: NaiveDate, window_days: u32) -> impl Iterator<Item = NaiveDate> {
    (1..=u64::from(window_days)).filter_map(move |i| today.checked_sub_days(Days::new(i)))
}

/// Merge per-day task sets, most recent day first, into the carryover list.
pub fn resolve_carryover(days: &[TaskSet]) -> Vec<String> {
    let completed: HashSet<&str> = days
        .iter()
        .flat_map(|day| day.completed.iter())
        .map(|task| task.trim())
        .collect();

    let mut seen = HashSet::new();
    let mut carried = Vec::new();
    for task in days.iter().flat_map(|day| day.uncompleted.iter()) {
        let text = task.trim();
        if text.is_empty() || text.starts_with('#') || completed.contains(text) {
            continue;
        }
        if seen.insert(text) {
            carried.push(text.to_string());
        }
    }
    carried
}

/// Unfinished tasks from the `window_days` days before `today` to seed today's note.
///
/// Returns an empty list when carryover is disabled in `config`.
pub fn compute_carryover(
    store: &dyn NoteStore,
    config: &dyn ConfigSource,
    today: NaiveDate,
    window_days: u32,
) -> Vec<String> {
    if !config.carryover_enabled() {
        tracing::debug!("carryover disabled");
        return Vec::new();
    }

    let days: Vec<TaskSet> = window(today, window_days)
        .map(|date| extract_tasks(store, date))
        .collect();
    let carried = resolve_carryover(&days);
    tracing::debug!(window_days, carried = carried.len(), "carryover resolved");
    carried
}
