//! High score persistence
//!
//! The engine only talks to a [`HighScoreStore`]. `FileStore` keeps the value
//! in `highscore.toml` under the platform data directory.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Key-value storage for the high score
pub trait HighScoreStore {
    /// Read the stored high score, None if absent or unreadable
    fn load(&self) -> Option<u64>;

    /// Write a new high score
    fn save(&mut self, high_score: u64) -> Result<(), String>;
}

/// In-memory store, also counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u64>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `high_score`
    pub fn with_value(high_score: u64) -> Self {
        Self {
            value: Some(high_score),
            writes: 0,
        }
    }

    /// Number of successful `save` calls
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Option<u64> {
        self.value
    }

    fn save(&mut self, high_score: u64) -> Result<(), String> {
        self.value = Some(high_score);
        self.writes += 1;
        Ok(())
    }
}

/// On-disk file contents
#[derive(Debug, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u64,
}

/// High score stored in a TOML file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at the platform data directory, None if it can't be determined
    pub fn open() -> Option<Self> {
        ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| Self::at(dirs.data_dir().join("highscore.toml")))
    }

    /// Store at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> Option<u64> {
        let contents = fs::read_to_string(&self.path).ok()?;
        match toml::from_str::<HighScoreFile>(&contents) {
            Ok(file) => Some(file.high_score),
            Err(e) => {
                tracing::warn!("Ignoring unreadable high score file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&mut self, high_score: u64) -> Result<(), String> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| format!("Failed to create data dir: {}", e))?;
        }

        let contents = toml::to_string(&HighScoreFile { high_score })
            .map_err(|e| format!("Failed to serialize: {}", e))?;

        fs::write(&self.path, contents).map_err(|e| format!("Failed to write high score: {}", e))
    }
}
