//! Best-score persistence
//!
//! The game only needs two things from storage: "remember this score if it
//! beats the best" and "what is the best so far". [`ScoreStore`] is that seam;
//! [`FileScoreStore`] keeps the record in a JSON file, [`MemoryScoreStore`]
//! keeps it in process.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Failure talking to score storage
#[derive(Debug)]
pub enum ScoreStoreError {
    Io(io::Error),
    /// Stored record could not be parsed
    Corrupt(serde_json::Error),
}

impl fmt::Display for ScoreStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreStoreError::Io(e) => write!(f, "score storage I/O failed: {}", e),
            ScoreStoreError::Corrupt(e) => write!(f, "score record is corrupt: {}", e),
        }
    }
}

impl std::error::Error for ScoreStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoreStoreError::Io(e) => Some(e),
            ScoreStoreError::Corrupt(e) => Some(e),
        }
    }
}

impl From<io::Error> for ScoreStoreError {
    fn from(e: io::Error) -> Self {
        ScoreStoreError::Io(e)
    }
}

impl From<serde_json::Error> for ScoreStoreError {
    fn from(e: serde_json::Error) -> Self {
        ScoreStoreError::Corrupt(e)
    }
}

/// Persists the best score ever reached
pub trait ScoreStore {
    /// Store `score` if it beats the current best. Returns true if it was stored.
    fn save_score(&mut self, score: u32) -> Result<bool, ScoreStoreError>;

    /// Best stored score, 0 if nothing has been stored yet
    fn top_score(&self) -> Result<u32, ScoreStoreError>;
}

/// The persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub score: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: u64,
}

impl HighScoreRecord {
    pub fn now(score: u32) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self { score, timestamp }
    }
}

/// In-process store, lost on exit
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: Option<HighScoreRecord>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self { best: None }
    }

    pub fn record(&self) -> Option<HighScoreRecord> {
        self.best
    }
}

impl ScoreStore for MemoryScoreStore {
    fn save_score(&mut self, score: u32) -> Result<bool, ScoreStoreError> {
        let best = self.best.map(|r| r.score).unwrap_or(0);
        if score <= best {
            return Ok(false);
        }
        self.best = Some(HighScoreRecord::now(score));
        Ok(true)
    }

    fn top_score(&self) -> Result<u32, ScoreStoreError> {
        Ok(self.best.map(|r| r.score).unwrap_or(0))
    }
}

/// JSON file store.
///
/// Writes go to `<path>.tmp` first and are renamed over the real file, so a
/// failed write leaves the previous record in place.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored record, `None` if the file does not exist
    pub fn load(&self) -> Result<Option<HighScoreRecord>, ScoreStoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn write(&self, record: &HighScoreRecord) -> Result<(), ScoreStoreError> {
        let json = serde_json::to_string_pretty(record)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ScoreStore for FileScoreStore {
    fn save_score(&mut self, score: u32) -> Result<bool, ScoreStoreError> {
        let best = match self.load() {
            Ok(record) => record.map(|r| r.score).unwrap_or(0),
            Err(ScoreStoreError::Corrupt(e)) => {
                log::warn!(
                    "Overwriting corrupt score file {}: {}",
                    self.path.display(),
                    e
                );
                0
            }
            Err(e) => return Err(e),
        };

        if score <= best {
            return Ok(false);
        }

        self.write(&HighScoreRecord::now(score))?;
        log::info!("New top score {} saved to {}", score, self.path.display());
        Ok(true)
    }

    fn top_score(&self) -> Result<u32, ScoreStoreError> {
        Ok(self.load()?.map(|r| r.score).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_keeps_best() {
        let mut store = MemoryScoreStore::new();
        assert_eq!(store.top_score().unwrap(), 0);

        assert!(store.save_score(5).unwrap());
        assert!(!store.save_score(3).unwrap());
        assert!(!store.save_score(5).unwrap());
        assert_eq!(store.top_score().unwrap(), 5);

        assert!(store.save_score(9).unwrap());
        assert_eq!(store.record().map(|r| r.score), Some(9));
    }

    #[test]
    fn test_zero_is_never_a_new_best() {
        let mut store = MemoryScoreStore::new();
        assert!(!store.save_score(0).unwrap());
        assert!(store.record().is_none());
    }

    #[test]
    fn test_file_store_missing_file_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileScoreStore::new(dir.path().join("scores.json"));
        assert_eq!(store.top_score().unwrap(), 0);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");

        let mut store = FileScoreStore::new(&path);
        assert!(store.save_score(12).unwrap());
        assert!(!store.save_score(4).unwrap());

        let reopened = FileScoreStore::new(&path);
        assert_eq!(reopened.top_score().unwrap(), 12);
        assert!(!dir.path().join("scores.json.tmp").exists());
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "not json").unwrap();

        let mut store = FileScoreStore::new(&path);
        assert!(matches!(store.top_score(), Err(ScoreStoreError::Corrupt(_))));

        // Saving replaces the broken record
        assert!(store.save_score(3).unwrap());
        assert_eq!(store.top_score().unwrap(), 3);
    }

    #[test]
    fn test_file_store_unwritable_location() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileScoreStore::new(dir.path().join("missing").join("scores.json"));
        let err = store.save_score(7).unwrap_err();
        assert!(matches!(err, ScoreStoreError::Io(_)));
        assert!(err.to_string().contains("I/O"));
    }
}
