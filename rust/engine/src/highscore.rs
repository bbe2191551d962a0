use std::cell::Cell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Default file name for the persisted record.
pub const DEFAULT_HIGHSCORE_FILE: &str = "highscore.json";

/// Persistence for the single best-score record.
///
/// `load` never fails: a missing, unreadable or corrupt record reads as `0`.
/// `save` failures are reported but are never fatal to a game session.
pub trait HighscoreStore {
    fn load(&self) -> u32;
    fn save(&mut self, value: u32) -> Result<(), GameError>;
}

/// On-disk form of the record: `{"highscore": 42, "updated_at": "..."}`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HighscoreRecord {
    pub highscore: u32,
    /// RFC3339 time of the last write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Highscore kept in a small JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the record, distinguishing "no file" (`Ok(None)`) from a
    /// file that could not be read or parsed.
    pub fn read_record(&self) -> Result<Option<HighscoreRecord>, GameError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(GameError::StoreUnavailable(format!(
                    "cannot read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        serde_json::from_str(&text).map(Some).map_err(|e| {
            GameError::StoreUnavailable(format!(
                "corrupt highscore record in {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHSCORE_FILE)
    }
}

impl HighscoreStore for JsonFileStore {
    fn load(&self) -> u32 {
        match self.read_record() {
            Ok(Some(record)) => record.highscore,
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "no highscore record yet");
                0
            }
            Err(e) => {
                tracing::warn!(error = %e, "treating highscore as 0");
                0
            }
        }
    }

    fn save(&mut self, value: u32) -> Result<(), GameError> {
        let unavailable = |e: std::io::Error| {
            GameError::StoreUnavailable(format!("cannot write {}: {}", self.path.display(), e))
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(unavailable)?;
            }
        }
        let record = HighscoreRecord {
            highscore: value,
            updated_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        };
        let mut line = serde_json::to_string(&record)
            .map_err(|e| GameError::StoreUnavailable(e.to_string()))?;
        line.push('\n');
        fs::write(&self.path, line).map_err(unavailable)?;
        tracing::debug!(path = %self.path.display(), highscore = value, "highscore saved");
        Ok(())
    }
}

/// In-memory store that remembers every save and counts loads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    saves: Vec<u32>,
    loads: Cell<usize>,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_highscore(value: u32) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// A store whose saves always fail with [`GameError::StoreUnavailable`].
    pub fn failing(value: u32) -> Self {
        Self {
            value: Some(value),
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }

    pub fn saves(&self) -> &[u32] {
        &self.saves
    }

    pub fn load_count(&self) -> usize {
        self.loads.get()
    }
}

impl HighscoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.loads.set(self.loads.get() + 1);
        self.value.unwrap_or(0)
    }

    fn save(&mut self, value: u32) -> Result<(), GameError> {
        if self.fail_saves {
            return Err(GameError::StoreUnavailable("memory store is read-only".into()));
        }
        self.value = Some(value);
        self.saves.push(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_counts_loads_and_records_saves() {
        let mut store = MemoryStore::with_highscore(4);
        assert_eq!(store.load(), 4);
        store.save(9).unwrap();
        assert_eq!(store.load(), 9);
        assert_eq!(store.saves(), &[9]);
        assert_eq!(store.load_count(), 2);
    }

    #[test]
    fn failing_store_keeps_its_value() {
        let mut store = MemoryStore::failing(3);
        assert!(matches!(store.save(10), Err(GameError::StoreUnavailable(_))));
        assert_eq!(store.load(), 3);
        assert!(store.saves().is_empty());
    }

    #[test]
    fn record_without_timestamp_deserializes() {
        let record: HighscoreRecord = serde_json::from_str(r#"{"highscore": 5}"#).unwrap();
        assert_eq!(record.highscore, 5);
        assert_eq!(record.updated_at, None);
    }
}
