//! Auto-repeat input handler for terminal environments.
//!
//! Horizontal keys get DAS/ARR repeats. Holding the drop key turns into the
//! soft-drop gravity modifier: the first press advances one row by hand, then
//! `update` raises `SoftDropStart` once per press and `SoftDropStop` once the
//! key is released. The game drops the modifier when a piece locks, so a
//! held key does not carry over to the next piece.
//!
//! Terminals that never send release events are handled with a timeout.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Actions produced by one `update` call
pub type ActionList = ArrayVec<GameAction, 32>;

// Without key-release events a tap must not turn into a held key forever.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks held keys between frames.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    soft_drop_engaged: bool,
    last_key_time: Instant,
    das_timer: u32,
    arr_accumulator: u32,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

fn is_left(code: KeyCode) -> bool {
    matches!(code, KeyCode::Left | KeyCode::Char('a' | 'A' | 'h' | 'H'))
}

fn is_right(code: KeyCode) -> bool {
    matches!(code, KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L'))
}

fn is_down(code: KeyCode) -> bool {
    matches!(code, KeyCode::Down | KeyCode::Char('s' | 'S' | 'j' | 'J'))
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            soft_drop_engaged: false,
            last_key_time: Instant::now(),
            das_timer: 0,
            arr_accumulator: 0,
            das_delay,
            // A zero rate would never drain the accumulator.
            arr_rate: arr_rate.max(1),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn soft_drop_engaged(&self) -> bool {
        self.soft_drop_engaged
    }

    fn hold_horizontal(&mut self, dir: HorizontalDirection, action: GameAction) -> Option<GameAction> {
        self.last_key_time = Instant::now();
        if self.horizontal == dir {
            return None;
        }
        self.horizontal = dir;
        self.das_timer = 0;
        self.arr_accumulator = 0;
        Some(action)
    }

    /// Register a press. Returns the immediate action for a newly held key;
    /// keys this handler does not track return `None`.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        if is_left(code) {
            return self.hold_horizontal(HorizontalDirection::Left, GameAction::MoveLeft);
        }
        if is_right(code) {
            return self.hold_horizontal(HorizontalDirection::Right, GameAction::MoveRight);
        }
        if is_down(code) {
            self.last_key_time = Instant::now();
            if self.down_held {
                return None;
            }
            self.down_held = true;
            return Some(GameAction::SoftDrop);
        }
        None
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        let released = (is_left(code) && self.horizontal == HorizontalDirection::Left)
            || (is_right(code) && self.horizontal == HorizontalDirection::Right);
        if released {
            self.release_horizontal();
        }
        if is_down(code) {
            self.down_held = false;
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.das_timer = 0;
        self.arr_accumulator = 0;
    }

    /// Advance held-key timers by `elapsed_ms` and collect repeat and
    /// soft-drop transition actions.
    pub fn update(&mut self, elapsed_ms: u32) -> ActionList {
        let mut actions = ActionList::new();

        let timeout = Duration::from_millis(self.key_release_timeout_ms as u64);
        if self.last_key_time.elapsed() > timeout {
            if self.horizontal != HorizontalDirection::None {
                self.release_horizontal();
            }
            self.down_held = false;
        }

        let repeat = match self.horizontal {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        };
        if let Some(action) = repeat {
            let prev_das = self.das_timer;
            self.das_timer = self.das_timer.saturating_add(elapsed_ms);

            if self.das_timer >= self.das_delay {
                let excess = if prev_das < self.das_delay {
                    self.das_timer - self.das_delay
                } else {
                    elapsed_ms
                };
                self.arr_accumulator += excess;

                while self.arr_accumulator >= self.arr_rate {
                    let _ = actions.try_push(action);
                    self.arr_accumulator -= self.arr_rate;
                }
            }
        }

        if self.down_held && !self.soft_drop_engaged {
            self.soft_drop_engaged = true;
            let _ = actions.try_push(GameAction::SoftDropStart);
        } else if !self.down_held && self.soft_drop_engaged {
            self.soft_drop_engaged = false;
            let _ = actions.try_push(GameAction::SoftDropStop);
        }

        actions
    }

    /// Forget every held key (after a reset or focus loss).
    pub fn reset(&mut self) {
        self.release_horizontal();
        self.down_held = false;
        self.soft_drop_engaged = false;
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
