//! Operations exposed to request dispatchers (HTTP server, native-messaging host, CLI).
//!
//! [`JournalService`] resolves the note store from the current configuration
//! snapshot on every call, so a vault change takes effect on the next request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use super::carryover::compute_carryover;
use super::clock::{Clock, SystemClock};
use super::streak::{compute_streak, StreakReport};
use super::template::render_new_note;
use crate::config::SharedConfig;
use crate::error::{JournalError, Result};
use crate::store::{FsNoteStore, NoteStore};

/// Result of fetching (and possibly creating) today's note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayNote {
    pub content: String,
    pub created: bool,
    pub carried_tasks: usize,
}

/// What the extension sees of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigView {
    pub vault: String,
    pub vault_name: Option<String>,
    pub carryover: bool,
}

/// Partial configuration change; absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigUpdate {
    pub vault: Option<String>,
    pub carryover: Option<bool>,
}

#[derive(Clone)]
pub struct JournalService {
    config: SharedConfig,
    clock: Arc<dyn Clock>,
}

impl JournalService {
    pub fn new(config: SharedConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    /// Service on the local calendar.
    pub fn with_system_clock(config: SharedConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }

    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Note store for the configured vault.
    pub fn store(&self) -> Result<FsNoteStore> {
        self.config
            .snapshot()
            .notes_root()
            .map(FsNoteStore::new)
            .ok_or_else(JournalError::no_vault)
    }

    pub fn streak_report(&self, today: NaiveDate) -> Result<StreakReport> {
        let store = self.store()?;
        let max_lookback = self.config.snapshot().streak.max_lookback_days;
        Ok(compute_streak(&store, today, max_lookback))
    }

    /// Tasks that a note created on `today` would start with.
    pub fn carryover_preview(&self, today: NaiveDate) -> Result<Vec<String>> {
        let store = self.store()?;
        let window_days = self.config.snapshot().carryover.window_days;
        Ok(compute_carryover(&store, &self.config, today, window_days))
    }

    /// Today's note, creating it from the template (plus carried tasks) if absent.
    pub fn get_or_create_today_note(&self, today: NaiveDate) -> Result<TodayNote> {
        let store = self.store()?;
        if let Some(content) = store.read_note(today)? {
            return Ok(TodayNote {
                content,
                created: false,
                carried_tasks: 0,
            });
        }

        let window_days = self.config.snapshot().carryover.window_days;
        let carried = compute_carryover(&store, &self.config, today, window_days);
        let content = render_new_note(&carried);
        store.write_note(today, &content)?;

        tracing::info!(date = %today, carried = carried.len(), "created daily note");
        Ok(TodayNote {
            content,
            created: true,
            carried_tasks: carried.len(),
        })
    }

    /// Historical lookup; a missing note is `None`, not an error.
    pub fn read_note(&self, date: NaiveDate) -> Result<Option<String>> {
        self.store()?.read_note(date)
    }

    pub fn save_note(&self, date: NaiveDate, content: &str) -> Result<()> {
        self.store()?.write_note(date, content)?;
        tracing::info!(date = %date, bytes = content.len(), "note saved");
        Ok(())
    }

    pub fn config_view(&self) -> ConfigView {
        let snapshot = self.config.snapshot();
        let vault_name = snapshot
            .resolved_vault()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()));
        ConfigView {
            vault: snapshot.storage.vault.clone(),
            vault_name,
            carryover: snapshot.carryover.enabled,
        }
    }

    /// Validate and persist a configuration change.
    ///
    /// A non-empty vault must be an existing directory.
    pub fn update_config(&self, update: ConfigUpdate) -> Result<ConfigView> {
        let vault = update.vault.map(|v| v.trim().to_string());
        if let Some(v) = vault.as_deref().filter(|v| !v.is_empty()) {
            let path: PathBuf = crate::config::expand_tilde(v);
            if !path.is_dir() {
                return Err(JournalError::Configuration(format!(
                    "vault path does not exist: {}",
                    path.display()
                )));
            }
        }

        self.config.update(|c| {
            if let Some(v) = vault {
                c.storage.vault = v;
            }
            if let Some(enabled) = update.carryover {
                c.carryover.enabled = enabled;
            }
        })?;

        let view = self.config_view();
        tracing::info!(vault = %view.vault, carryover = view.carryover, "configuration updated");
        Ok(view)
    }
}
