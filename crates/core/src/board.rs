//! Board module - the persistent grid of locked cells
//!
//! The board is 10 columns x 18 rows. Each cell is empty or tagged with the
//! kind of the piece that filled it. Storage is a flat row-major array so the
//! board is `Copy`-cheap to snapshot and never allocates.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..17 (top to bottom)

use arrayvec::ArrayVec;

use crate::shapes::PieceShape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices, bottom to top. Sized for the whole board so hand-built
/// positions with many full rows still fit.
pub type RowList = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 18 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Row-major (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// One row as a slice, or `None` past the bottom.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Indices of every complete row, scanned bottom to top.
    pub fn full_rows(&self) -> RowList {
        (0..BOARD_HEIGHT as usize)
            .rev()
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove every full row at once and compact the rest downward.
    ///
    /// Rows above a removed row move down by the number of removed rows
    /// beneath them; the freed rows at the top come back empty. Returns the
    /// removed row indices (bottom to top, as they were before the shift).
    pub fn clear_full_rows(&mut self) -> RowList {
        let mut cleared = RowList::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Write a piece's minos into the board, tagged with `kind`.
    ///
    /// Minos above the visible field (negative row) cannot be stored and are
    /// dropped; the return value is `false` when that happened, which the
    /// caller treats as a top-out.
    pub fn lock_piece(&mut self, shape: &PieceShape, x: i8, y: i8, kind: PieceKind) -> bool {
        let mut inside = true;
        for &(dx, dy) in shape {
            let py = y + dy;
            if py < 0 {
                inside = false;
                continue;
            }
            self.set(x + dx, py, Some(kind));
        }
        inside
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from text rows for tests: `.` is empty, a piece letter
    /// fills the cell. Rows are bottom-aligned; missing rows above are empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let top = (BOARD_HEIGHT as usize).saturating_sub(rows.len());
        for (i, line) in rows.iter().enumerate() {
            for (x, ch) in line.chars().take(BOARD_WIDTH as usize).enumerate() {
                let cell = PieceKind::from_str(&ch.to_string());
                board.set(x as i8, (top + i) as i8, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
