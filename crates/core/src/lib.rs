//! Core game logic - pure, deterministic, and testable
//!
//! Everything here is a handheld-style falling-block game with no I/O: no
//! terminal, no clock, no files. The host feeds actions and frame ticks in
//! and reads snapshots and cue events out.
//!
//! # Module Structure
//!
//! - [`board`]: 10x18 grid of locked cells, full-row detection and removal
//! - [`shapes`]: precomputed rotation states and the simple kick search
//! - [`collision`]: does a shape fit at an anchor
//! - [`factory`]: seeded uniform piece generation and spawn placement
//! - [`scoring`]: line scores, combo bonus, level and drop-speed tables
//! - [`scheduler`]: frame accumulator that decides when gravity fires
//! - [`game_state`]: the session state machine tying it all together
//!
//! # Example
//!
//! ```
//! use gb_tetris_core::GameState;
//! use gb_tetris_types::{GameAction, GamePhase};
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.phase(), GamePhase::Title);
//!
//! game.apply_action(GameAction::Start);
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.board().filled_count(), 4);
//! ```
//!
//! # Timing
//!
//! One [`GameState::tick`] is one frame (the host targets ~16ms). Gravity is
//! counted in frames from a per-level table; the elapsed milliseconds only
//! feed the session clock used by the combo window.

pub mod board;
pub mod collision;
pub mod factory;
pub mod game_state;
pub mod scheduler;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use gb_tetris_types as types;

pub use board::{Board, RowList};
pub use collision::fits;
pub use factory::{Piece, PieceFactory};
pub use game_state::GameState;
pub use scheduler::DropScheduler;
pub use scoring::{calculate_level, calculate_score, ScoreResult};
pub use shapes::{get_shape, shape_matrix, try_rotate, PieceShape};
pub use snapshot::GameSnapshot;
