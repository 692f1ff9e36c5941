//! Drop scheduler - turns frames into gravity steps
//!
//! The scheduler owns its own frame accumulator instead of reading a global
//! frame counter. Each `tick` is one frame; when the accumulator reaches the
//! active interval the caller is told to try a one-row drop, and the
//! accumulator starts over whether or not that drop succeeds.

use crate::scoring::drop_interval_frames;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropScheduler {
    frames: u32,
    soft_drop: bool,
}

impl DropScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame. Returns `true` when a gravity step is due.
    pub fn tick(&mut self, level: u32) -> bool {
        self.frames += 1;
        if self.frames >= self.interval(level) {
            self.frames = 0;
            return true;
        }
        false
    }

    /// Frames between drops right now
    pub fn interval(&self, level: u32) -> u32 {
        drop_interval_frames(level, self.soft_drop)
    }

    /// Start the count over (after a manual advance or a new piece).
    pub fn reset(&mut self) {
        self.frames = 0;
    }

    pub fn set_soft_drop(&mut self, active: bool) {
        self.soft_drop = active;
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }
}
