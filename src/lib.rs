//! GB Tetris (workspace facade crate).
//!
//! The game itself lives in the crates under `crates/`; this package
//! re-exports them and adds the host side: configuration, logging, the
//! high-score store and audio cues.

pub use gb_tetris_core as core;
pub use gb_tetris_input as input;
pub use gb_tetris_term as term;
pub use gb_tetris_types as types;

pub mod config;
pub mod cues;
pub mod high_score;
pub mod logging;
