//! Plain-text note storage, one file per calendar day.
//!
//! [`FsNoteStore`] maps a date to `<root>/<YYYY-MM-DD>.md`. [`MemoryNoteStore`]
//! keeps notes in a map so journal logic can be exercised without a filesystem.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{JournalError, Result};

/// Read/write access to note text by calendar date.
pub trait NoteStore: Send + Sync {
    /// Note text for `date`, or `None` when no note exists.
    fn read_note(&self, date: NaiveDate) -> Result<Option<String>>;

    /// Replace the note for `date` with `content`. Last write wins.
    fn write_note(&self, date: NaiveDate, content: &str) -> Result<()>;
}

/// File name of the note for `date`.
pub fn note_file_name(date: NaiveDate) -> String {
    format!("{}.md", date.format("%Y-%m-%d"))
}

/// Parse a `YYYY-MM-DD` string as used in note file names and request paths.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| JournalError::InvalidDate(s.to_string()))
}

/// Notes stored as UTF-8 markdown files in a single directory.
#[derive(Debug, Clone)]
pub struct FsNoteStore {
    root: PathBuf,
}

impl FsNoteStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn note_path(&self, date: NaiveDate) -> PathBuf {
        self.root.join(note_file_name(date))
    }

    /// Create the notes directory (and parents) if missing.
    pub fn ensure_directory(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root).map_err(|e| JournalError::io(&self.root, e))
    }

    /// Number of `YYYY-MM-DD.md` files in the notes directory.
    pub fn count_notes(&self) -> Result<usize> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(JournalError::io(&self.root, e)),
        };

        let mut count = 0;
        for entry in entries {
            let entry = entry.map_err(|e| JournalError::io(&self.root, e))?;
            let name = entry.file_name();
            let is_note = name
                .to_str()
                .and_then(|n| n.strip_suffix(".md"))
                .is_some_and(|stem| parse_date(stem).is_ok());
            if is_note {
                count += 1;
            }
        }
        Ok(count)
    }
}

impl NoteStore for FsNoteStore {
    fn read_note(&self, date: NaiveDate) -> Result<Option<String>> {
        let path = self.note_path(date);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(JournalError::io(&path, e)),
        }
    }

    fn write_note(&self, date: NaiveDate, content: &str) -> Result<()> {
        self.ensure_directory()?;
        let path = self.note_path(date);
        std::fs::write(&path, content).map_err(|e| JournalError::io(&path, e))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "note written");
        Ok(())
    }
}

/// In-memory note store for exercising journal logic without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    notes: Mutex<HashMap<NaiveDate, String>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, for seeding fixtures.
    pub fn with_note(self, date: NaiveDate, content: impl Into<String>) -> Self {
        self.lock().insert(date, content.into());
        self
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<NaiveDate, String>> {
        match self.notes.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl NoteStore for MemoryNoteStore {
    fn read_note(&self, date: NaiveDate) -> Result<Option<String>> {
        Ok(self.lock().get(&date).cloned())
    }

    fn write_note(&self, date: NaiveDate, content: &str) -> Result<()> {
        self.lock().insert(date, content.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn file_name_is_iso_date() {
        assert_eq!(note_file_name(d(2024, 3, 5)), "2024-03-05.md");
    }

    #[test]
    fn parse_date_accepts_iso_and_rejects_garbage() {
        assert_eq!(parse_date("2024-03-05").unwrap(), d(2024, 3, 5));
        assert!(matches!(
            parse_date("03/05/2024"),
            Err(JournalError::InvalidDate(_))
        ));
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryNoteStore::new().with_note(d(2024, 1, 1), "hello");
        assert_eq!(store.read_note(d(2024, 1, 1)).unwrap().as_deref(), Some("hello"));
        assert_eq!(store.read_note(d(2024, 1, 2)).unwrap(), None);

        store.write_note(d(2024, 1, 1), "replaced").unwrap();
        assert_eq!(
            store.read_note(d(2024, 1, 1)).unwrap().as_deref(),
            Some("replaced")
        );
        assert_eq!(store.len(), 1);
    }
}
