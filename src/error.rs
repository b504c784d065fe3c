//! Error taxonomy for the journal engine.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, JournalError>;

#[derive(Error, Debug)]
pub enum JournalError {
    /// No vault configured, or the configured vault is unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Filesystem read/write failure, carrying the underlying message.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A date string that is not `YYYY-MM-DD`.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// The config file could not be parsed or serialized.
    #[error("config format error: {0}")]
    ConfigFormat(String),
}

impl JournalError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn no_vault() -> Self {
        Self::Configuration("no vault configured".into())
    }
}
