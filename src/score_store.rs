//! High score persistence: one number, kept as JSON under the local data dir.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FlappyError, Result};

const APP_DIR: &str = "flappy-sim";
const SCORE_FILE: &str = "high_score.json";

/// Where the previous best score lives between processes.
pub trait ScoreStore {
    fn load(&mut self) -> Result<u32>;
    fn save(&mut self, best: u32) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    best: u32,
}

/// Get the per-user data directory (`<local data>/flappy-sim`).
pub fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir().ok_or(FlappyError::NoDataDir)?;
    Ok(base.join(APP_DIR))
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(data_dir()?.join(SCORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    /// A missing file is not an error: nobody has played yet.
    fn load(&mut self) -> Result<u32> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let record: HighScoreRecord = serde_json::from_str(&json)?;
        Ok(record.best)
    }

    fn save(&mut self, best: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&HighScoreRecord { best })?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Keeps the score in memory only. Used for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub best: u32,
    pub saves: usize,
}

impl ScoreStore for MemoryStore {
    fn load(&mut self) -> Result<u32> {
        Ok(self.best)
    }

    fn save(&mut self, best: u32) -> Result<()> {
        self.best = best;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("flappy-sim-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file_loads_zero() {
        let mut store = JsonFileStore::new(scratch_path("missing/high_score.json"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("saved/high_score.json");
        let mut store = JsonFileStore::new(&path);
        store.save(7).expect("save should succeed");
        assert_eq!(store.load().unwrap(), 7);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"best\": 7"));

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = scratch_path("corrupt/high_score.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json at all").unwrap();
        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(FlappyError::Json(_))));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_default_path_file_name() {
        if let Ok(path) = JsonFileStore::default_path() {
            assert!(path.ends_with("flappy-sim/high_score.json"));
        }
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load().unwrap(), 0);
        store.save(4).unwrap();
        store.save(9).unwrap();
        assert_eq!(store.load().unwrap(), 9);
        assert_eq!(store.saves, 2);
    }
}
