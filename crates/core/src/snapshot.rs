//! Render snapshot: an owned copy of the game state for one frame.

use crate::board::{Board, RowList};
use crate::factory::Piece;
use crate::types::GamePhase;

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub board: Board,
    /// Full rows waiting out their flash, bottom to top
    pub clearing_rows: RowList,
    pub active: Option<Piece>,
    pub ghost_y: Option<i8>,
    /// Preview piece, absent on the title screen
    pub next: Option<Piece>,
    pub phase: GamePhase,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_clearing(&self, y: usize) -> bool {
        self.clearing_rows.contains(&y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::GameState;
    use crate::types::GameAction;

    #[test]
    fn snapshot_tracks_phase() {
        let mut game = GameState::new(3);
        assert!(!game.snapshot().playable());
        game.apply_action(GameAction::Start);
        let snap = game.snapshot();
        assert!(snap.playable());
        assert!(snap.active.is_some());
        assert_eq!(snap.ghost_y, game.ghost_y());
        assert!(!snap.is_clearing(17));
    }
}
