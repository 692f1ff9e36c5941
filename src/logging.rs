//! File logging.
//!
//! The terminal is in raw mode on the alternate screen while the game runs,
//! so log lines go to a file instead of stderr.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Send `log` output to `path` (appending). Level comes from `RUST_LOG`,
/// `info` by default. With no path, logging stays off.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("install logger")?;
    Ok(())
}
