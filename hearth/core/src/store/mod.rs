//! Snapshot Persistence
//!
//! A small key-value store for JSON snapshots, mirroring the browser
//! localStorage the original client used: string keys, whole-value JSON
//! strings, last write wins, no transactions. The file backend keeps one
//! `<key>.json` per key under the data directory; the memory backend serves
//! tests and environments without a home directory.
//!
//! Persistence is best-effort everywhere: the Hearth logs failures and
//! keeps state in memory.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

/// Key for the daily goals snapshot
pub const GOALS_KEY: &str = "gentle_daily_goals";
/// Key for the saved messages snapshot
pub const SAVED_KEY: &str = "gentle_saved_messages";
/// Key for the cached quote of the day
pub const DAILY_KEY: &str = "gentle_daily_quote";

/// Error when a snapshot read or write fails
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading a key's file failed
    #[error("Failed to read snapshot {key}: {source}")]
    Read {
        /// The key being read
        key: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
    /// Writing a key's file failed
    #[error("Failed to write snapshot {key}: {source}")]
    Write {
        /// The key being written
        key: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// Storage seam for JSON snapshots
///
/// Implementations must be shareable across tasks; the Hearth holds one
/// behind an `Arc`.
pub trait SnapshotStore: Send + Sync {
    /// Read the raw JSON for a key, `None` if never written
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write the raw JSON for a key, replacing any previous value
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// File-backed store, one JSON file per key
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at the given directory
    ///
    /// The directory is created lazily on first write.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform data directory (`…/ember`)
    ///
    /// `None` when the platform reports no data directory.
    #[must_use]
    pub fn open_default() -> Option<Self> {
        dirs::data_dir().map(|base| Self::open(base.join("ember")))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Read {
                key: key.to_string(),
                source: err,
            }),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|err| StoreError::Write {
            key: key.to_string(),
            source: err,
        })?;
        std::fs::write(self.path_for(key), value).map_err(|err| StoreError::Write {
            key: key.to_string(),
            source: err,
        })
    }
}

/// In-memory store for tests and homeless environments
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
