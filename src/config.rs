//! Configuration loading, persistence, and atomic reload.
//!
//! [`JournalConfig`] is read from `~/.focus-guard/config.toml` with environment
//! overrides applied on top. [`SharedConfig`] wraps it for the running service:
//! readers take an immutable snapshot, writers swap in a new one.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::info;

use crate::error::{JournalError, Result};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct JournalConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub carryover: CarryoverConfig,
    pub streak: StreakConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Vault root. Empty means "not configured yet".
    pub vault: String,
    /// Directory under the vault holding one `YYYY-MM-DD.md` file per day.
    pub notes_dir: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CarryoverConfig {
    pub enabled: bool,
    pub window_days: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct StreakConfig {
    pub max_lookback_days: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 19549,
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            vault: String::new(),
            notes_dir: "Progress".into(),
        }
    }
}

impl Default for CarryoverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_days: 7,
        }
    }
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            max_lookback_days: 365,
        }
    }
}

/// Returns `~/.focus-guard/`
pub fn default_app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".focus-guard")
}

/// Returns the default config file path: `~/.focus-guard/config.toml`
pub fn default_config_path() -> PathBuf {
    default_app_dir().join("config.toml")
}

impl JournalConfig {
    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::read_file(path)?.with_env_overrides())
    }

    /// Exactly what the file says, defaults for anything missing. No env overrides.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("no config file at {}, using defaults", path.display());
            return Ok(JournalConfig::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| JournalError::io(path, e))?;
        toml::from_str(&contents)
            .map_err(|e| JournalError::ConfigFormat(format!("{}: {e}", path.display())))
    }

    /// Copy of `self` with environment overrides applied on top.
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_env_overrides();
        self
    }

    /// Write the config as TOML. Uses atomic write (tmp + rename).
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| JournalError::io(parent, e))?;
        }
        let contents =
            toml::to_string_pretty(self).map_err(|e| JournalError::ConfigFormat(e.to_string()))?;

        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, contents).map_err(|e| JournalError::io(&tmp_path, e))?;
        std::fs::rename(&tmp_path, path).map_err(|e| JournalError::io(path, e))?;
        Ok(())
    }

    /// Apply environment variable overrides
    /// (FOCUS_GUARD_VAULT, FOCUS_GUARD_LOG_LEVEL, FOCUS_GUARD_CARRYOVER, FOCUS_GUARD_PORT).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("FOCUS_GUARD_VAULT") {
            self.storage.vault = val;
        }
        if let Ok(val) = std::env::var("FOCUS_GUARD_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("FOCUS_GUARD_CARRYOVER") {
            if let Some(flag) = parse_flag(&val) {
                self.carryover.enabled = flag;
            }
        }
        if let Ok(val) = std::env::var("FOCUS_GUARD_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
    }

    /// Resolve the vault path, expanding `~` if needed. `None` when unset.
    pub fn resolved_vault(&self) -> Option<PathBuf> {
        let vault = self.storage.vault.trim();
        if vault.is_empty() {
            None
        } else {
            Some(expand_tilde(vault))
        }
    }

    /// Directory holding the daily notes: `<vault>/<notes_dir>`.
    pub fn notes_root(&self) -> Option<PathBuf> {
        self.resolved_vault().map(|v| v.join(&self.storage.notes_dir))
    }
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// The two configuration reads the journal engine depends on.
pub trait ConfigSource: Send + Sync {
    /// Directory holding daily notes, or `None` when no vault is configured.
    fn storage_root(&self) -> Option<PathBuf>;
    fn carryover_enabled(&self) -> bool;
}

impl ConfigSource for JournalConfig {
    fn storage_root(&self) -> Option<PathBuf> {
        self.notes_root()
    }

    fn carryover_enabled(&self) -> bool {
        self.carryover.enabled
    }
}

/// Process-wide configuration handle.
///
/// Holds two layers: the config as stored in the file, and the live snapshot
/// (file layer plus env overrides) that readers see. Updates are applied to the
/// file layer only, so env overrides never reach disk. Cloning is cheap; all
/// clones observe the same snapshot.
#[derive(Debug, Clone)]
pub struct SharedConfig {
    layers: Arc<RwLock<Layers>>,
    path: Option<PathBuf>,
    env_overrides: bool,
}

#[derive(Debug)]
struct Layers {
    file: JournalConfig,
    live: Arc<JournalConfig>,
}

impl SharedConfig {
    /// Load the file at `path` and layer env overrides on top.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = JournalConfig::read_file(&path)?;
        Ok(Self::new(file, path))
    }

    /// Wrap `file` (the config as persisted at `path`), with env overrides live.
    pub fn new(file: JournalConfig, path: impl Into<PathBuf>) -> Self {
        Self::build(file, Some(path.into()), true)
    }

    /// Wrap a config with no backing file and no env overrides; updates stay in memory.
    pub fn in_memory(config: JournalConfig) -> Self {
        Self::build(config, None, false)
    }

    fn build(file: JournalConfig, path: Option<PathBuf>, env_overrides: bool) -> Self {
        let live = Arc::new(Self::live_from(&file, env_overrides));
        Self {
            layers: Arc::new(RwLock::new(Layers { file, live })),
            path,
            env_overrides,
        }
    }

    fn live_from(file: &JournalConfig, env_overrides: bool) -> JournalConfig {
        if env_overrides {
            file.clone().with_env_overrides()
        } else {
            file.clone()
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current immutable snapshot.
    pub fn snapshot(&self) -> Arc<JournalConfig> {
        match self.layers.read() {
            Ok(guard) => Arc::clone(&guard.live),
            Err(poisoned) => Arc::clone(&poisoned.into_inner().live),
        }
    }

    /// Re-read the backing file and swap the snapshot. No-op for in-memory configs.
    pub fn reload(&self) -> Result<Arc<JournalConfig>> {
        let Some(path) = &self.path else {
            return Ok(self.snapshot());
        };
        let mut layers = self.write_layers();
        let file = JournalConfig::read_file(path)?;
        let live = Arc::new(Self::live_from(&file, self.env_overrides));
        *layers = Layers {
            file,
            live: Arc::clone(&live),
        };
        info!(path = %path.display(), "configuration reloaded");
        Ok(live)
    }

    /// Apply `change` to the file layer, persist it, then swap in the new snapshot.
    ///
    /// The write lock is held throughout, so concurrent updates apply one after
    /// another. Nothing changes in memory if the file write fails.
    pub fn update<F>(&self, change: F) -> Result<Arc<JournalConfig>>
    where
        F: FnOnce(&mut JournalConfig),
    {
        let mut layers = self.write_layers();
        let mut file = layers.file.clone();
        change(&mut file);
        if let Some(path) = &self.path {
            file.save_to(path)?;
        }
        let live = Arc::new(Self::live_from(&file, self.env_overrides));
        *layers = Layers {
            file,
            live: Arc::clone(&live),
        };
        Ok(live)
    }

    fn write_layers(&self) -> std::sync::RwLockWriteGuard<'_, Layers> {
        match self.layers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl ConfigSource for SharedConfig {
    fn storage_root(&self) -> Option<PathBuf> {
        self.snapshot().notes_root()
    }

    fn carryover_enabled(&self) -> bool {
        self.snapshot().carryover.enabled
    }
}
