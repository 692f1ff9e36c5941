//! Shared types and rule constants.
//!
//! Everything here is plain data with no dependencies, so the core engine,
//! the input mapper and the terminal render sink can all agree on it.
//!
//! # Board
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 18 rows (indexed 0-17), the handheld playfield
//! - **Spawn**: rotation 0, horizontally centered, anchored at row [`SPAWN_ROW`]
//!
//! # Timing
//!
//! Gravity is counted in frames, not milliseconds. One call to the engine's
//! `tick` is one frame; [`TICK_MS`] is only the host's target frame length.
//!
//! | Level | Frames per drop |
//! |-------|-----------------|
//! | 0 | 53 |
//! | 1 | 49 |
//! | 5 | 33 |
//! | 10 | 10 |
//! | 20+ | 3 |
//!
//! While the soft-drop modifier is held the piece falls every
//! [`SOFT_DROP_FRAMES`] frames regardless of level.
//!
//! # Examples
//!
//! ```
//! use gb_tetris_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(GameAction::from_str("jump"), None);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 18);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (18 rows)
pub const BOARD_HEIGHT: u8 = 18;

/// Row the top of a freshly spawned piece's bounding box is anchored to.
pub const SPAWN_ROW: i8 = 0;

/// Host frame length in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Level a new session starts at.
pub const START_LEVEL: u32 = 1;

/// Highest reachable level.
pub const MAX_LEVEL: u32 = 20;

/// Lines needed per level step.
pub const LINES_PER_LEVEL: u32 = 10;

/// Frames per automatic drop, indexed by level (0..=20).
///
/// Levels above 20 use the last entry.
pub const LEVEL_FRAMES: [u32; 21] = [
    53, 49, 45, 41, 37, 33, 28, 22, 17, 11, 10, 9, 8, 7, 6, 6, 5, 5, 4, 4, 3,
];

/// Frames per drop while the soft-drop modifier is held.
pub const SOFT_DROP_FRAMES: u32 = 2;

/// Frames the cleared rows stay visible (flashing) before they are removed.
pub const LINE_CLEAR_FLASH_FRAMES: u32 = 6;

/// Horizontal kick offsets tried, in order, when a rotation does not fit.
pub const KICK_OFFSETS: [i8; 4] = [-1, 1, -2, 2];

/// Line clear base points, indexed by the number of rows cleared at once.
///
/// The value is multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Combo bonus per combo step (multiplied by combo count and level).
pub const COMBO_BASE: u32 = 50;

/// Two clears closer together than this (session clock) chain a combo.
pub const COMBO_WINDOW_MS: u64 = 1000;

/// Points for each row the player advances the piece by hand.
pub const SOFT_DROP_POINTS: u32 = 1;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;


/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use gb_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("L"), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// A cell on the game board
///
/// - `None`: empty
/// - `Some(kind)`: filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Lifecycle phase of a session. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Title,
    Running,
    Paused,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Title => "title",
            GamePhase::Running => "running",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameOver",
        }
    }
}

/// Logical player actions.
///
/// Keyboard keys and touch buttons are mapped onto these by the host; the
/// engine never sees raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Advance the piece one row by hand (locks if it cannot move)
    SoftDrop,
    /// Begin holding the soft-drop modifier (fast gravity)
    SoftDropStart,
    /// Release the soft-drop modifier
    SoftDropStop,
    /// Drop to the lowest valid row and lock
    HardDrop,
    /// Rotate to the next rotation state, with wall kicks
    Rotate,
    /// Toggle between running and paused
    Pause,
    /// Start from the title screen, toggle pause while playing, restart after game over
    Start,
    /// Throw away the session and start a fresh one
    Reset,
}

impl GameAction {
    /// Parse an action identifier (case-insensitive).
    ///
    /// Unknown identifiers yield `None` and are meant to be ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use gb_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "softdropstart" => Some(GameAction::SoftDropStart),
            "softdropstop" => Some(GameAction::SoftDropStop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "start" => Some(GameAction::Start),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    /// Convert to the camelCase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::SoftDropStart => "softDropStart",
            GameAction::SoftDropStop => "softDropStop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Start => "start",
            GameAction::Reset => "reset",
        }
    }
}

/// Cue emitted by the engine for audio/visual feedback.
///
/// The engine only records these; playing a sound or flashing the screen is
/// up to whoever drains them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A session began (from the title screen or a reset)
    Started,
    Moved,
    Rotated,
    /// The active piece was written into the board
    Locked,
    /// One to three rows were removed
    LineClear { lines: u8 },
    /// Four rows were removed at once
    Tetris,
    LevelUp { level: u32 },
    /// The session score passed the previous best
    HighScore { score: u32 },
    Paused,
    Resumed,
    GameOver { score: u32 },
}
