//! Audio cues for game events.
//!
//! A terminal has one sound: the bell. Each cue rings it a number of times,
//! with routine cues (move, rotate, land) kept silent so play is not a
//! constant beep. Muting is a host toggle and never reaches the core.

use std::io::{self, Write};

use anyhow::Result;
use log::trace;

use crate::types::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Move,
    Rotate,
    Land,
    Clear,
    Tetris,
    LevelUp,
    GameOver,
}

impl Cue {
    /// The cue for an engine event, if it has one.
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::Moved => Some(Cue::Move),
            GameEvent::Rotated => Some(Cue::Rotate),
            GameEvent::Locked => Some(Cue::Land),
            GameEvent::LineClear { .. } => Some(Cue::Clear),
            GameEvent::Tetris => Some(Cue::Tetris),
            GameEvent::LevelUp { .. } => Some(Cue::LevelUp),
            GameEvent::GameOver { .. } => Some(Cue::GameOver),
            GameEvent::Started
            | GameEvent::HighScore { .. }
            | GameEvent::Paused
            | GameEvent::Resumed => None,
        }
    }

    pub fn bells(self) -> usize {
        match self {
            Cue::Move | Cue::Rotate | Cue::Land => 0,
            Cue::Clear => 1,
            Cue::Tetris | Cue::LevelUp => 2,
            Cue::GameOver => 3,
        }
    }
}

pub struct CueSink<W: Write = io::Stdout> {
    out: W,
    enabled: bool,
}

impl CueSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CueSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, enabled: true }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Flip mute; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn play(&mut self, cue: Cue) -> Result<()> {
        trace!("cue {:?}", cue);
        let bells = cue.bells();
        if !self.enabled || bells == 0 {
            return Ok(());
        }
        for _ in 0..bells {
            self.out.write_all(b"\x07")?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Play the cue for every event that has one.
    pub fn play_events(&mut self, events: impl IntoIterator<Item = GameEvent>) -> Result<()> {
        for cue in events.into_iter().filter_map(Cue::for_event) {
            self.play(cue)?;
        }
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}
