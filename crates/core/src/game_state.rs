//! Game state module - owns a session and drives every engine component
//!
//! `GameState` is the only thing holding mutable session data: board, active
//! and next piece, score/level/lines/combo, the drop scheduler and the
//! lifecycle phase. Hosts talk to it through two calls per frame, applied in
//! this order:
//!
//! 1. [`GameState::apply_action`] for each input received this frame
//! 2. [`GameState::tick`] once, for gravity and the line-clear flash
//!
//! Every operation is total. A rejected move or rotation returns `false` and
//! leaves the state untouched.

use arrayvec::ArrayVec;
use log::{debug, info};

use crate::board::{Board, RowList};
use crate::collision::fits;
use crate::factory::{Piece, PieceFactory};
use crate::scheduler::DropScheduler;
use crate::scoring::{calculate_level, calculate_score};
use crate::shapes::try_rotate;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Upper bound on cue events buffered between drains.
const EVENT_CAPACITY: usize = 32;

/// Rows waiting out their flash before removal.
#[derive(Debug, Clone)]
struct PendingClear {
    rows: RowList,
    frames_left: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Piece>,
    /// Preview piece; `None` until a session starts.
    next: Option<Piece>,
    factory: PieceFactory,
    scheduler: DropScheduler,
    phase: GamePhase,
    score: u32,
    high_score: u32,
    level: u32,
    lines: u32,
    combo: u32,
    /// Session clock (sum of tick `elapsed_ms`) at the previous clear.
    last_clear_ms: Option<u64>,
    clock_ms: u64,
    pending_clear: Option<PendingClear>,
    line_clear_frames: u32,
    events: ArrayVec<GameEvent, EVENT_CAPACITY>,
}

impl GameState {
    /// Create a game on the title screen with a seeded random factory
    pub fn new(seed: u64) -> Self {
        Self::with_factory(PieceFactory::new(seed))
    }

    pub fn with_factory(factory: PieceFactory) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            factory,
            scheduler: DropScheduler::new(),
            phase: GamePhase::Title,
            score: 0,
            high_score: 0,
            level: START_LEVEL,
            lines: 0,
            combo: 0,
            last_clear_ms: None,
            clock_ms: 0,
            pending_clear: None,
            line_clear_frames: LINE_CLEAR_FLASH_FRAMES,
            events: ArrayVec::new(),
        }
    }

    /// Seed the best score loaded by the host.
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score;
        self
    }

    /// How many frames full rows flash before removal. `0` clears them in
    /// the same call that locked the piece.
    pub fn with_line_clear_frames(mut self, frames: u32) -> Self {
        self.line_clear_frames = frames;
        self
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next(&self) -> Option<Piece> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Rows currently flashing before removal (empty when none)
    pub fn clearing_rows(&self) -> &[usize] {
        self.pending_clear
            .as_ref()
            .map(|p| p.rows.as_slice())
            .unwrap_or(&[])
    }

    pub fn soft_drop_active(&self) -> bool {
        self.scheduler.soft_drop()
    }

    /// Cue events raised since the last drain, oldest first
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            clearing_rows: self
                .pending_clear
                .as_ref()
                .map(|p| p.rows.clone())
                .unwrap_or_default(),
            active: self.active,
            ghost_y: self.ghost_y(),
            next: self.next,
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            level: self.level,
            lines: self.lines,
            combo: self.combo,
        }
    }

    /// Queue a cue event. When the buffer is full the oldest event that is
    /// not a `GameOver` makes room, so the newest cues always survive.
    fn emit(&mut self, event: GameEvent) {
        if self.events.is_full() {
            let evict = self
                .events
                .iter()
                .position(|e| !matches!(e, GameEvent::GameOver { .. }))
                .unwrap_or(0);
            self.events.remove(evict);
        }
        self.events.push(event);
    }

    /// Apply a player action, gated by the current phase.
    ///
    /// Returns `true` if the action changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start => {
                match self.phase {
                    GamePhase::Title => self.begin(),
                    GamePhase::Running => self.pause(),
                    GamePhase::Paused => self.resume(),
                    GamePhase::GameOver => self.reset(),
                }
                true
            }
            GameAction::Pause => match self.phase {
                GamePhase::Running => {
                    self.pause();
                    true
                }
                GamePhase::Paused => {
                    self.resume();
                    true
                }
                _ => false,
            },
            GameAction::Reset => {
                self.reset();
                true
            }
            _ if self.phase != GamePhase::Running => false,
            GameAction::SoftDropStart => {
                self.scheduler.set_soft_drop(true);
                true
            }
            GameAction::SoftDropStop => {
                self.scheduler.set_soft_drop(false);
                true
            }
            GameAction::MoveLeft => self.shift(-1),
            GameAction::MoveRight => self.shift(1),
            GameAction::SoftDrop => self.manual_advance(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.rotate(),
        }
    }

    /// Advance one frame. Returns `true` if the piece dropped, locked or a
    /// pending clear completed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.clock_ms += elapsed_ms as u64;

        if let Some(pending) = self.pending_clear.as_mut() {
            pending.frames_left = pending.frames_left.saturating_sub(1);
            if pending.frames_left == 0 {
                self.finish_clear();
                return true;
            }
            return false;
        }

        if self.active.is_none() {
            return false;
        }

        if self.scheduler.tick(self.level) {
            if !self.try_move(0, 1) {
                self.lock_active();
            }
            return true;
        }
        false
    }

    /// Where the active piece would come to rest if dropped now
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        let shape = active.shape();
        let mut y = active.y;
        while fits(&self.board, &shape, active.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Move the active piece if the new anchor fits.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let (Some(x), Some(y)) = (active.x.checked_add(dx), active.y.checked_add(dy)) else {
            return false;
        };
        if !fits(&self.board, &active.shape(), x, y) {
            return false;
        }
        self.active = Some(Piece { x, y, ..active });
        true
    }

    fn shift(&mut self, dx: i8) -> bool {
        let moved = self.try_move(dx, 0);
        if moved {
            self.emit(GameEvent::Moved);
        }
        moved
    }

    /// Turn the active piece clockwise, trying the horizontal kicks if the
    /// plain rotation does not fit.
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let board = &self.board;
        let result = try_rotate(active.kind, active.rotation, active.x, active.y, |shape, x, y| {
            fits(board, shape, x, y)
        });

        let Some((rotation, x)) = result else {
            return false;
        };
        self.active = Some(Piece {
            rotation,
            x,
            ..active
        });
        self.emit(GameEvent::Rotated);
        true
    }

    /// One row down by hand. A blocked piece locks, like a failed gravity step.
    fn manual_advance(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        if self.try_move(0, 1) {
            self.add_score(SOFT_DROP_POINTS);
        } else {
            self.lock_active();
        }
        self.scheduler.reset();
        true
    }

    /// Drop straight down as far as possible, then lock.
    pub fn hard_drop(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        while self.try_move(0, 1) {}
        self.lock_active();
        true
    }

    /// Write the active piece into the board and start the line clear.
    pub fn lock_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let inside = self
            .board
            .lock_piece(&active.shape(), active.x, active.y, active.kind);
        debug!("locked {:?} at ({}, {})", active.kind, active.x, active.y);
        self.emit(GameEvent::Locked);
        self.scheduler.reset();
        // The next piece starts at normal speed; a fresh press re-engages.
        self.scheduler.set_soft_drop(false);

        if !inside {
            self.game_over();
            return;
        }

        let rows = self.board.full_rows();
        if rows.is_empty() {
            self.spawn_next();
            return;
        }

        self.pending_clear = Some(PendingClear {
            rows,
            frames_left: self.line_clear_frames,
        });
        if self.line_clear_frames == 0 {
            self.finish_clear();
        }
    }

    /// Remove the flashed rows, score them and bring in the next piece.
    fn finish_clear(&mut self) {
        if self.pending_clear.take().is_none() {
            return;
        }

        let cleared = self.board.clear_full_rows().len();
        let result = calculate_score(
            cleared,
            self.level,
            self.combo,
            self.last_clear_ms,
            self.clock_ms,
        );
        self.combo = result.combo;
        self.last_clear_ms = Some(self.clock_ms);
        self.lines += cleared as u32;
        debug!(
            "cleared {} rows for {} (+{} combo x{})",
            cleared, result.line_clear_score, result.combo_bonus, result.combo
        );

        self.emit(if cleared >= 4 {
            GameEvent::Tetris
        } else {
            GameEvent::LineClear {
                lines: cleared as u8,
            }
        });
        self.add_score(result.total);

        let level = calculate_level(self.lines);
        if level > self.level {
            self.level = level;
            info!("level up: {}", level);
            self.emit(GameEvent::LevelUp { level });
        }

        self.spawn_next();
    }

    /// Promote the preview piece and draw a new preview.
    fn spawn_next(&mut self) {
        let piece = match self.next.take() {
            Some(piece) => piece,
            None => self.factory.create(),
        };
        self.next = Some(self.factory.create());
        self.scheduler.reset();
        if !fits(&self.board, &piece.shape(), piece.x, piece.y) {
            self.game_over();
            return;
        }
        self.active = Some(piece);
    }

    fn add_score(&mut self, points: u32) {
        if points == 0 {
            return;
        }
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
            self.emit(GameEvent::HighScore { score: self.score });
        }
    }

    fn begin(&mut self) {
        self.clear_session();
        self.phase = GamePhase::Running;
        info!("game started");
        self.emit(GameEvent::Started);
        self.spawn_next();
    }

    fn pause(&mut self) {
        self.phase = GamePhase::Paused;
        self.scheduler.set_soft_drop(false);
        self.emit(GameEvent::Paused);
    }

    fn resume(&mut self) {
        self.phase = GamePhase::Running;
        self.emit(GameEvent::Resumed);
    }

    /// Throw the session away and start a new one (passing through Title).
    pub fn reset(&mut self) {
        info!("reset at score {}", self.score);
        self.phase = GamePhase::Title;
        self.begin();
    }

    fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.active = None;
        self.pending_clear = None;
        self.scheduler.set_soft_drop(false);
        info!(
            "game over: score {} level {} lines {}",
            self.score, self.level, self.lines
        );
        self.emit(GameEvent::GameOver { score: self.score });
    }

    fn clear_session(&mut self) {
        self.board.clear();
        self.active = None;
        self.next = None;
        self.scheduler = DropScheduler::new();
        self.score = 0;
        self.level = START_LEVEL;
        self.lines = 0;
        self.combo = 0;
        self.last_clear_ms = None;
        self.clock_ms = 0;
        self.pending_clear = None;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Running game with a fixed piece sequence and synchronous clears.
    fn running(kinds: &[PieceKind]) -> GameState {
        let mut state =
            GameState::with_factory(PieceFactory::scripted(kinds.to_vec())).with_line_clear_frames(0);
        assert!(state.apply_action(GameAction::Start));
        state
    }

    fn events(state: &mut GameState) -> Vec<GameEvent> {
        state.drain_events().collect()
    }

    #[test]
    fn test_new_game_is_on_title() {
        let state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, START_LEVEL);
        assert!(state.active.is_none());
    }

    #[test]
    fn test_title_ignores_gameplay_input() {
        let mut state = GameState::new(12345);
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::HardDrop));
        assert!(!state.apply_action(GameAction::Pause));
        assert!(!state.tick(16));
        assert_eq!(state.phase, GamePhase::Title);
    }

    #[test]
    fn test_start_spawns_current_and_next() {
        let mut state = running(&[PieceKind::T, PieceKind::S, PieceKind::Z]);
        assert_eq!(state.active.unwrap().kind, PieceKind::T);
        assert_eq!(state.next.unwrap().kind, PieceKind::S);
        assert_eq!(events(&mut state), vec![GameEvent::Started]);
    }

    #[test]
    fn test_reset_draws_fresh_current_and_next() {
        let mut state = running(&[PieceKind::T, PieceKind::S, PieceKind::Z]);
        assert!(state.apply_action(GameAction::Reset));
        // T and S were dealt to the old session; the new one starts at Z.
        assert_eq!(state.active.unwrap().kind, PieceKind::Z);
        assert_eq!(state.next.unwrap().kind, PieceKind::T);
    }

    #[test]
    fn test_hard_drop_i_piece_rests_on_floor() {
        let mut state = running(&[PieceKind::I]);
        let piece = state.active.unwrap();
        assert_eq!((piece.x, piece.y), (3, 0));

        assert!(state.hard_drop());
        for x in 3..7 {
            assert!(state.board.is_occupied(x, 17));
        }
        assert_eq!(state.board.filled_count(), 4);
        assert_eq!(state.lines, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_single_line_clear_shifts_rows() {
        let mut state = running(&[PieceKind::I]);
        state.board = Board::from_rows(&["T.........", "OOO....OOO"]);

        assert!(state.apply_action(GameAction::HardDrop));
        assert_eq!(state.lines, 1);
        assert_eq!(state.score, 40 * START_LEVEL);
        assert_eq!(state.board.get(0, 17), Some(Some(PieceKind::T)));
        assert_eq!(state.board.filled_count(), 1);
        assert!(state.active.is_some());
        assert!(events(&mut state).contains(&GameEvent::LineClear { lines: 1 }));
    }

    #[test]
    fn test_four_lines_pay_tetris() {
        let mut state = running(&[PieceKind::I]);
        state.board = Board::from_rows(&[
            "IIIIII.III",
            "IIIIII.III",
            "IIIIII.III",
            "IIIIII.III",
        ]);
        // Vertical I sits in box column 2: anchor 4 puts it on column 6.
        state.active = Some(Piece {
            kind: PieceKind::I,
            rotation: 1,
            x: 4,
            y: 0,
        });

        state.hard_drop();
        assert_eq!(state.lines, 4);
        assert_eq!(state.score, 1200);
        assert_eq!(state.board.filled_count(), 0);
        assert!(events(&mut state).contains(&GameEvent::Tetris));
    }

    #[test]
    fn test_t_rotation_kicks_off_left_wall() {
        let mut state = running(&[PieceKind::T]);
        // Rotation 1 hugs the left wall with its box one column outside.
        state.active = Some(Piece {
            kind: PieceKind::T,
            rotation: 1,
            x: -1,
            y: 5,
        });

        assert!(state.apply_action(GameAction::Rotate));
        let piece = state.active.unwrap();
        assert_eq!(piece.rotation, 2);
        assert_eq!(piece.x, 0);
        assert_eq!(piece.y, 5);
    }

    #[test]
    fn test_failed_rotation_leaves_piece_untouched() {
        let mut state = running(&[PieceKind::I]);
        // Vertical I in a one-wide well: horizontal needs 4 free columns.
        state.board = Board::from_rows(&[
            "OOOOO.OOOO",
            "OOOOO.OOOO",
            "OOOOO.OOOO",
            "OOOOO.OOOO",
        ]);
        let before = Piece {
            kind: PieceKind::I,
            rotation: 1,
            x: 3,
            y: 14,
        };
        state.active = Some(before);

        assert!(!state.rotate());
        assert_eq!(state.active, Some(before));
    }

    #[test]
    fn test_o_rotation_changes_nothing() {
        let mut state = running(&[PieceKind::O]);
        let before = state.active.unwrap();
        assert!(state.rotate());
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn test_move_blocked_by_wall() {
        let mut state = running(&[PieceKind::O]);
        let mut moved = 0;
        for _ in 0..10 {
            if state.apply_action(GameAction::MoveLeft) {
                moved += 1;
            }
        }
        assert_eq!(moved, 4);
        assert_eq!(state.active.unwrap().x, 0);
    }

    #[test]
    fn test_combo_within_window() {
        let mut state = running(&[PieceKind::I]);
        state.board = Board::from_rows(&["OOO....OOO", "OOO....OOO"]);

        state.hard_drop();
        assert_eq!(state.combo, 0);
        assert_eq!(state.score, 40);

        state.hard_drop();
        assert_eq!(state.combo, 1);
        assert_eq!(state.score, 40 + 40 + 50);
    }

    #[test]
    fn test_combo_resets_after_window() {
        let mut state = running(&[PieceKind::I]);
        state.board = Board::from_rows(&["OOO....OOO", "OOO....OOO"]);

        state.hard_drop();
        // 63 frames is just over a second on the session clock.
        for _ in 0..63 {
            state.tick(16);
        }
        assert!(state.clock_ms >= COMBO_WINDOW_MS);
        state.hard_drop();
        assert_eq!(state.combo, 0);
        assert_eq!(state.score, 80);
    }

    #[test]
    fn test_level_up_after_ten_lines() {
        let mut state = running(&[PieceKind::I]);
        state.lines = 9;
        state.board = Board::from_rows(&["OOO....OOO"]);

        state.hard_drop();
        assert_eq!(state.lines, 10);
        assert_eq!(state.level, 2);
        assert!(events(&mut state).contains(&GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_level_capped() {
        let mut state = running(&[PieceKind::I]);
        state.lines = 400;
        state.level = MAX_LEVEL;
        state.board = Board::from_rows(&["OOO....OOO"]);
        state.hard_drop();
        assert_eq!(state.level, MAX_LEVEL);
    }

    #[test]
    fn test_gravity_follows_level_table() {
        let mut state = running(&[PieceKind::T]);
        let y0 = state.active.unwrap().y;
        for _ in 0..48 {
            assert!(!state.tick(16));
        }
        assert!(state.tick(16));
        assert_eq!(state.active.unwrap().y, y0 + 1);
    }

    #[test]
    fn test_soft_drop_modifier_speeds_gravity() {
        let mut state = running(&[PieceKind::T]);
        let y0 = state.active.unwrap().y;
        assert!(state.apply_action(GameAction::SoftDropStart));
        for _ in 0..10 {
            state.tick(16);
        }
        assert_eq!(state.active.unwrap().y, y0 + 5);
        assert!(state.apply_action(GameAction::SoftDropStop));
        assert!(!state.soft_drop_active());
        // Gravity never scores.
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_lock_releases_soft_drop_modifier() {
        let mut state = running(&[PieceKind::O, PieceKind::T]);
        assert!(state.apply_action(GameAction::SoftDropStart));
        assert!(state.apply_action(GameAction::HardDrop));
        assert!(!state.soft_drop_active());

        let y0 = state.active.unwrap().y;
        for _ in 0..4 {
            state.tick(16);
        }
        assert_eq!(state.active.unwrap().y, y0);
    }

    #[test]
    fn test_move_overflow_is_rejected() {
        let mut state = running(&[PieceKind::O]);
        let before = state.active;
        assert!(!state.try_move(i8::MAX, 0));
        assert!(!state.try_move(i8::MIN, 0));
        assert!(!state.try_move(0, i8::MAX));
        assert_eq!(state.active, before);
    }

    #[test]
    fn test_full_event_buffer_keeps_newest_and_game_over() {
        let mut state = running(&[PieceKind::O]);
        for _ in 0..40 {
            state.apply_action(GameAction::Rotate);
        }
        while state.phase == GamePhase::Running {
            state.hard_drop();
        }

        let drained = events(&mut state);
        assert_eq!(drained.len(), EVENT_CAPACITY);
        assert_eq!(drained.last(), Some(&GameEvent::GameOver { score: 0 }));
    }

    #[test]
    fn test_manual_advance_resets_scheduler() {
        let mut state = running(&[PieceKind::T]);
        for _ in 0..48 {
            state.tick(16);
        }
        assert!(state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.active.unwrap().y, 1);
        assert_eq!(state.score, SOFT_DROP_POINTS);

        // The pending gravity step was consumed by the manual advance.
        assert!(!state.tick(16));
        assert_eq!(state.active.unwrap().y, 1);
    }

    #[test]
    fn test_manual_advance_locks_when_blocked() {
        let mut state = running(&[PieceKind::O, PieceKind::T]);
        while state.try_move(0, 1) {}
        assert!(state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.board.filled_count(), 4);
        assert_eq!(state.active.unwrap().kind, PieceKind::T);
    }

    #[test]
    fn test_gravity_locks_grounded_piece() {
        let mut state = running(&[PieceKind::O]);
        while state.try_move(0, 1) {}
        for _ in 0..49 {
            state.tick(16);
        }
        assert_eq!(state.board.filled_count(), 4);
    }

    #[test]
    fn test_flash_defers_removal_and_spawn() {
        let mut state = GameState::with_factory(PieceFactory::scripted(vec![PieceKind::I]));
        state.apply_action(GameAction::Start);
        state.board = Board::from_rows(&["OOO....OOO"]);

        state.hard_drop();
        assert!(state.active.is_none());
        assert_eq!(state.clearing_rows(), &[17]);
        assert!(state.board.is_row_full(17));
        assert!(!state.apply_action(GameAction::MoveLeft));

        for _ in 1..LINE_CLEAR_FLASH_FRAMES {
            assert!(!state.tick(16));
        }
        assert!(state.tick(16));
        assert!(state.clearing_rows().is_empty());
        assert_eq!(state.board.filled_count(), 0);
        assert_eq!(state.score, 40);
        assert!(state.active.is_some());
    }

    #[test]
    fn test_spawn_blocked_is_game_over() {
        let mut state = running(&[PieceKind::O, PieceKind::I]);
        for _ in 0..4 {
            state.try_move(-1, 0);
        }
        for x in 3..7 {
            state.board.set(x, 1, Some(PieceKind::Z));
        }

        state.hard_drop();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.active.is_none());
        assert!(events(&mut state).contains(&GameEvent::GameOver { score: 0 }));
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.tick(16));
    }

    #[test]
    fn test_lock_above_field_is_game_over() {
        let mut state = running(&[PieceKind::I]);
        state.board.set(2, 2, Some(PieceKind::O));
        state.active = Some(Piece {
            kind: PieceKind::I,
            rotation: 1,
            x: 0,
            y: -2,
        });

        state.hard_drop();
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_start_after_game_over_resets() {
        let mut state = running(&[PieceKind::I]);
        state.score = 500;
        state.lines = 12;
        state.level = 2;
        state.combo = 3;
        state.board.set(0, 17, Some(PieceKind::J));
        state.game_over();

        assert!(state.apply_action(GameAction::Start));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.level, START_LEVEL);
        assert_eq!(state.combo, 0);
        assert_eq!(state.board.filled_count(), 0);
        assert!(state.active.is_some());
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = running(&[PieceKind::T]);
        state.apply_action(GameAction::SoftDrop);
        let before = state.active;
        let clock = state.clock_ms;

        assert!(state.apply_action(GameAction::Pause));
        assert_eq!(state.phase, GamePhase::Paused);
        for _ in 0..200 {
            assert!(!state.tick(16));
        }
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.active, before);
        assert_eq!(state.clock_ms, clock);

        assert!(state.apply_action(GameAction::Start));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.active, before);
    }

    #[test]
    fn test_high_score_raised_with_score() {
        let mut state = GameState::with_factory(PieceFactory::scripted(vec![PieceKind::I]))
            .with_line_clear_frames(0)
            .with_high_score(30);
        state.apply_action(GameAction::Start);
        state.board = Board::from_rows(&["OOO....OOO"]);

        state.hard_drop();
        assert_eq!(state.high_score, 40);
        assert!(events(&mut state).contains(&GameEvent::HighScore { score: 40 }));

        state.reset();
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 40);
    }

    #[test]
    fn test_ghost_y_matches_hard_drop() {
        let mut state = running(&[PieceKind::L]);
        state.board = Board::from_rows(&["...JJ.....", "...JJ....."]);
        let ghost = state.ghost_y().unwrap();
        let x = state.active.unwrap().x;
        while state.try_move(0, 1) {}
        assert_eq!(state.active.unwrap().y, ghost);
        assert_eq!(state.active.unwrap().x, x);
    }

    #[test]
    fn test_move_emits_cue_only_on_success() {
        let mut state = running(&[PieceKind::O]);
        events(&mut state);
        for _ in 0..6 {
            state.apply_action(GameAction::MoveRight);
        }
        let moved = events(&mut state)
            .into_iter()
            .filter(|e| *e == GameEvent::Moved)
            .count();
        assert_eq!(moved, 4);
    }
}
