//! Score history persistence using JSON
//!
//! Stores the best score and the most recent runs in
//! ~/.local/share/blockfall/scores.json (or platform equivalent).
//! Reading or writing the file never fails from the game's point of view:
//! bad data loads as an empty record and write errors are only logged.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Number of runs kept in the history
pub const MAX_SAVED_SCORES: usize = 20;

/// Best score plus the most recent runs, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub high: u64,
    pub history: Vec<RunEntry>,
}

/// A single finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunEntry {
    /// Local time as "YYYY-MM-DD HH:MM"
    pub time: String,
    pub score: u64,
    pub level: u32,
}

impl ScoreRecord {
    /// Fold a finished run into the record
    pub fn finalize(&mut self, score: u64, level: u32, time: String) {
        self.high = self.high.max(score);
        self.history.push(RunEntry { time, score, level });
        if self.history.len() > MAX_SAVED_SCORES {
            let excess = self.history.len() - MAX_SAVED_SCORES;
            self.history.drain(..excess);
        }
    }
}

/// Current local time in the history format
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
}

/// Where finished runs are recorded
pub trait ScoreStore {
    /// Load the stored record, or an empty one if nothing usable is stored
    fn load(&self) -> ScoreRecord;
    /// Best-effort write of the record
    fn save(&mut self, record: &ScoreRecord);
}

/// Score record kept in a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonScoreFile {
    path: Option<PathBuf>,
}

impl JsonScoreFile {
    /// Use the platform data directory
    pub fn default_location() -> Self {
        let path = ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| dirs.data_dir().join("scores.json"));
        Self { path }
    }

    /// Use an explicit file
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn read(path: &Path) -> Result<ScoreRecord, String> {
        let contents =
            fs::read_to_string(path).map_err(|e| format!("Failed to read scores: {}", e))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse scores: {}", e))
    }

    fn write(path: &Path, record: &ScoreRecord) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| format!("Failed to create data dir: {}", e))?;
        }

        let contents = serde_json::to_string_pretty(record)
            .map_err(|e| format!("Failed to serialize: {}", e))?;

        fs::write(path, contents).map_err(|e| format!("Failed to write scores: {}", e))
    }
}

impl ScoreStore for JsonScoreFile {
    fn load(&self) -> ScoreRecord {
        let Some(path) = &self.path else {
            return ScoreRecord::default();
        };
        if !path.exists() {
            return ScoreRecord::default();
        }

        match Self::read(path) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("{} ({}), starting with an empty record", e, path.display());
                ScoreRecord::default()
            }
        }
    }

    fn save(&mut self, record: &ScoreRecord) {
        let Some(path) = &self.path else {
            tracing::warn!("Could not determine score file location, run not saved");
            return;
        };

        match Self::write(path, record) {
            Ok(()) => tracing::debug!("Saved {} runs to {}", record.history.len(), path.display()),
            Err(e) => tracing::warn!("{} ({})", e, path.display()),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{ScoreRecord, ScoreStore};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// In-memory store whose contents stay observable after the game takes it
    #[derive(Debug, Clone, Default)]
    pub struct MemoryStore {
        pub record: Rc<RefCell<ScoreRecord>>,
        pub saves: Rc<RefCell<usize>>,
    }

    impl ScoreStore for MemoryStore {
        fn load(&self) -> ScoreRecord {
            self.record.borrow().clone()
        }

        fn save(&mut self, record: &ScoreRecord) {
            *self.record.borrow_mut() = record.clone();
            *self.saves.borrow_mut() += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("blockfall-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_finalize_tracks_high_and_truncates() {
        let mut record = ScoreRecord::default();
        for i in 0..25u64 {
            record.finalize(i * 10, 0, format!("run {}", i));
        }
        assert_eq!(record.high, 240);
        assert_eq!(record.history.len(), MAX_SAVED_SCORES);
        assert_eq!(record.history[0].time, "run 5");
        assert_eq!(record.history[19].time, "run 24");

        record.finalize(3, 1, "low".to_string());
        assert_eq!(record.high, 240);
        assert_eq!(record.history.last().unwrap().score, 3);
    }

    #[test]
    fn test_missing_file_loads_default() {
        let store = JsonScoreFile::at(scratch_file("missing.json"));
        assert_eq!(store.load(), ScoreRecord::default());
    }

    #[test]
    fn test_malformed_file_loads_default() {
        let path = scratch_file("malformed.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(JsonScoreFile::at(&path).load(), ScoreRecord::default());

        // valid JSON without the expected fields
        fs::write(&path, r#"{"best": 10}"#).unwrap();
        assert_eq!(JsonScoreFile::at(&path).load(), ScoreRecord::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_file("roundtrip.json");
        let mut store = JsonScoreFile::at(&path);
        let mut record = ScoreRecord::default();
        record.finalize(1200, 2, "2026-01-01 10:00".to_string());
        store.save(&record);

        assert_eq!(store.load(), record);
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"high\": 1200"));
    }

    #[test]
    fn test_unwritable_location_is_swallowed() {
        let blocker = scratch_file("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let mut store = JsonScoreFile::at(blocker.join("scores.json"));
        store.save(&ScoreRecord::default());
        assert_eq!(store.load(), ScoreRecord::default());
    }

    #[test]
    fn test_timestamp_format() {
        let now = timestamp_now();
        assert_eq!(now.len(), "2026-01-01 10:00".len());
        assert_eq!(&now[4..5], "-");
        assert_eq!(&now[10..11], " ");
    }
}
