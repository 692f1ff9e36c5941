//! Persistence of the single best score.
//!
//! The core only tracks the number; where it lives is up to the host. The
//! file format is a small JSON object: `{"high_score": 1200}`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

pub trait HighScoreStore {
    /// Stored best score, `0` when nothing has been stored yet.
    fn load(&mut self) -> Result<u32>;

    fn save(&mut self, score: u32) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<u32> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => {
                return Err(err).with_context(|| format!("read {}", self.path.display()))
            }
        };
        let file: HighScoreFile = serde_json::from_str(&text)
            .with_context(|| format!("parse {}", self.path.display()))?;
        Ok(file.high_score)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        let json = serde_json::to_string(&HighScoreFile { high_score: score })?;
        fs::write(&self.path, json).with_context(|| format!("write {}", self.path.display()))
    }
}

/// In-memory store, for tests and for running without a writable disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub value: Option<u32>,
    pub saves: usize,
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<u32> {
        Ok(self.value.unwrap_or(0))
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.value = Some(score);
        self.saves += 1;
        Ok(())
    }
}

/// Load the best score, treating any failure as `0`.
pub fn load_or_zero(store: &mut dyn HighScoreStore) -> u32 {
    match store.load() {
        Ok(score) => {
            info!("high score {}", score);
            score
        }
        Err(err) => {
            warn!("high score unavailable, starting from 0: {:#}", err);
            0
        }
    }
}

/// Save, logging instead of failing. Losing a high score must not end a game.
pub fn save_or_warn(store: &mut dyn HighScoreStore, score: u32) {
    if let Err(err) = store.save(score) {
        warn!("could not save high score {}: {:#}", score, err);
    }
}
