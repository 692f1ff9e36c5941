//! Host configuration read from the environment.
//!
//! Game rules are constants in `gb-tetris-types`; only host concerns (seed,
//! file locations, key repeat tuning) are configurable here.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use log::warn;

use crate::types::{DEFAULT_ARR_MS, DEFAULT_DAS_MS};

pub const ENV_SEED: &str = "GB_TETRIS_SEED";
pub const ENV_HIGHSCORE: &str = "GB_TETRIS_HIGHSCORE";
pub const ENV_LOG: &str = "GB_TETRIS_LOG";
pub const ENV_DAS_MS: &str = "GB_TETRIS_DAS_MS";
pub const ENV_ARR_MS: &str = "GB_TETRIS_ARR_MS";

pub const DEFAULT_HIGHSCORE_FILE: &str = "gb-tetris-highscore.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Piece RNG seed
    pub seed: u64,
    pub high_score_path: PathBuf,
    /// Log file; logging is off when unset
    pub log_path: Option<PathBuf>,
    pub das_ms: u32,
    pub arr_ms: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys take defaults; unparsable ones
    /// take defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = parse_or(&lookup, ENV_SEED).unwrap_or_else(clock_seed);
        let high_score_path = lookup(ENV_HIGHSCORE)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HIGHSCORE_FILE));
        let log_path = log_path(&lookup);

        Self {
            seed,
            high_score_path,
            log_path,
            das_ms: parse_or(&lookup, ENV_DAS_MS).unwrap_or(DEFAULT_DAS_MS),
            arr_ms: parse_or(&lookup, ENV_ARR_MS).unwrap_or(DEFAULT_ARR_MS),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// `GB_TETRIS_LOG` alone, so logging can start before the rest of the
/// config is parsed (and its warnings are kept).
pub fn log_path_from_env() -> Option<PathBuf> {
    log_path(&|key: &str| std::env::var(key).ok())
}

fn log_path(lookup: &impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    lookup(ENV_LOG)
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
