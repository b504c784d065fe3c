#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use focus_guard::config::{JournalConfig, SharedConfig};
use focus_guard::journal::clock::FixedClock;
use focus_guard::journal::service::JournalService;
use focus_guard::store::{FsNoteStore, NoteStore};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Wednesday 2024-05-15; every test runs "today" on this date.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
}

/// `n` days before [`today`].
pub fn ago(n: u64) -> NaiveDate {
    today().checked_sub_days(Days::new(n)).unwrap()
}

/// A fresh vault directory.
pub fn test_vault() -> TempDir {
    TempDir::new().unwrap()
}

/// Config pointing at `vault`, carryover on.
pub fn config_for(vault: &Path) -> JournalConfig {
    let mut config = JournalConfig::default();
    config.storage.vault = vault.to_string_lossy().into_owned();
    config
}

/// Service over `vault` with the clock pinned to [`today`].
pub fn service_for(vault: &Path) -> JournalService {
    JournalService::new(
        SharedConfig::in_memory(config_for(vault)),
        Arc::new(FixedClock(today())),
    )
}

/// Store for the notes directory inside `vault`.
pub fn store_for(vault: &Path) -> FsNoteStore {
    FsNoteStore::new(config_for(vault).notes_root().unwrap())
}

/// Write a note `n` days before today.
pub fn write_note(vault: &Path, days_ago: u64, content: &str) {
    store_for(vault).write_note(ago(days_ago), content).unwrap();
}
