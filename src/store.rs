//! Key-value persistence store
//!
//! Flat string keys and values used to remember the player's identity
//! and the last final score between screens and runs.

use crate::{QuizError, Result, APP_NAME, STORE_FILE};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Key holding the player's display name
pub const PLAYER_NAME_KEY: &str = "playerName";
/// Key holding the joined room code
pub const ROOM_CODE_KEY: &str = "roomCode";
/// Key holding the last final score as a decimal string
pub const FINAL_SCORE_KEY: &str = "finalScore";

/// Flat string key-value store
pub trait KeyValueStore {
    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;
}

/// In-memory store, lost when the process exits
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// Store backed by a flat JSON object on disk.
///
/// Every `set` rewrites the whole file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at the standard location
    pub fn new() -> Result<Self> {
        Self::open(Self::store_file_path()?)
    }

    /// Open the store at `path`, loading existing entries
    pub fn open(path: PathBuf) -> Result<Self> {
        let entries = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                QuizError::PersistenceError(format!(
                    "Failed to read store file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            serde_json::from_str(&content).map_err(|e| {
                QuizError::PersistenceError(format!(
                    "Failed to parse store file {}: {}",
                    path.display(),
                    e
                ))
            })?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    /// Get the standard store file path
    /// Uses $DATA_HOME/quizmaster/store.json
    pub fn store_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            QuizError::ConfigError("Unable to determine data directory".to_string())
        })?;

        Ok(data_dir.join(APP_NAME).join(STORE_FILE))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                QuizError::PersistenceError(format!(
                    "Failed to create store directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content).map_err(|e| {
            QuizError::PersistenceError(format!(
                "Failed to write store file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}
