//! Piece factory - random pieces placed at the spawn anchor
//!
//! Kinds are drawn uniformly from the seven tetrominoes (no bag). The RNG is
//! seeded so a session can be replayed; tests can also script the exact
//! sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::shapes::{box_size, get_shape, PieceShape};
use crate::types::{PieceKind, BOARD_WIDTH, SPAWN_ROW};

/// A falling piece.
///
/// `(x, y)` is the top-left corner of the kind's bounding box in board
/// coordinates; `y` may be negative while the piece is above the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// A piece of `kind` at rotation 0, centered over the field at [`SPAWN_ROW`].
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: ((BOARD_WIDTH - box_size(kind)) / 2) as i8,
            y: SPAWN_ROW,
        }
    }

    /// Mino offsets of the current rotation state
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four minos
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }
}

#[derive(Debug, Clone)]
enum Source {
    Random(StdRng),
    Scripted { kinds: Vec<PieceKind>, next: usize },
}

/// Produces the pieces of a session.
#[derive(Debug, Clone)]
pub struct PieceFactory {
    source: Source,
}

impl PieceFactory {
    /// Uniform random kinds from a seeded RNG.
    pub fn new(seed: u64) -> Self {
        Self {
            source: Source::Random(StdRng::seed_from_u64(seed)),
        }
    }

    /// Hand out `kinds` in order, cycling when exhausted.
    ///
    /// An empty list falls back to `O` pieces.
    pub fn scripted(kinds: impl Into<Vec<PieceKind>>) -> Self {
        Self {
            source: Source::Scripted {
                kinds: kinds.into(),
                next: 0,
            },
        }
    }

    fn next_kind(&mut self) -> PieceKind {
        match &mut self.source {
            Source::Random(rng) => PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())],
            Source::Scripted { kinds, next } => {
                if kinds.is_empty() {
                    return PieceKind::O;
                }
                let kind = kinds[*next % kinds.len()];
                *next = (*next + 1) % kinds.len();
                kind
            }
        }
    }

    /// Draw the next piece, positioned at spawn.
    pub fn create(&mut self) -> Piece {
        Piece::spawn(self.next_kind())
    }
}

impl Default for PieceFactory {
    fn default() -> Self {
        Self::new(1)
    }
}
