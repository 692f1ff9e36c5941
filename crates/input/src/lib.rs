//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and provides
//! an auto-repeat handler that works in terminals without key-release events.

pub mod handler;
pub mod map;

pub use gb_tetris_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit, should_toggle_sound};
