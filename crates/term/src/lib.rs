//! Terminal renderer for the game.
//!
//! Views draw into a plain framebuffer instead of using a widget toolkit; the
//! renderer then diffs frames and flushes them through `crossterm`. Board
//! cells default to 2 columns wide to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use gb_tetris_core as core;
pub use gb_tetris_types as types;

pub use fb::{shade, Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, HostStatus, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
