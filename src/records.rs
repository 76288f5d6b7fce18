//! High-score persistence.
//!
//! Only one number survives a session: the best score. It is read when a
//! session is built and written back at game over when it was beaten.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("cannot access high score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score file {path} is not valid json: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Somewhere a single high score can be kept.
pub trait HighScoreStore {
    /// Stored high score, 0 when nothing has been saved yet.
    fn load(&self) -> Result<u32, RecordsError>;

    fn save(&mut self, score: u32) -> Result<(), RecordsError>;

    /// Save `score` if it beats the stored one. Returns whether it did.
    fn submit(&mut self, score: u32) -> Result<bool, RecordsError> {
        if score <= self.load()? {
            return Ok(false);
        }
        self.save(score)?;
        Ok(true)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// `{"high_score": N}` in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: io::Error) -> RecordsError {
        RecordsError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32, RecordsError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(self.io_error(e)),
        };
        let file: HighScoreFile =
            serde_json::from_str(&text).map_err(|source| RecordsError::Json {
                path: self.path.clone(),
                source,
            })?;
        Ok(file.high_score)
    }

    fn save(&mut self, score: u32) -> Result<(), RecordsError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string(&HighScoreFile { high_score: score }).map_err(
            |source| RecordsError::Json {
                path: self.path.clone(),
                source,
            },
        )?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        log::debug!("saved high score {} to {}", score, self.path.display());
        Ok(())
    }
}

/// Keeps the score for the lifetime of the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStore {
    high_score: u32,
}

impl MemoryStore {
    pub fn new(high_score: u32) -> Self {
        Self { high_score }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32, RecordsError> {
        Ok(self.high_score)
    }

    fn save(&mut self, score: u32) -> Result<(), RecordsError> {
        self.high_score = score;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_submit() {
        let mut store = MemoryStore::new(100);
        assert!(!store.submit(50).unwrap());
        assert!(!store.submit(100).unwrap());
        assert!(store.submit(101).unwrap());
        assert_eq!(store.load().unwrap(), 101);
    }
}
