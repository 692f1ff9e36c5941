//! Collision checking - can a shape sit at an anchor?

use crate::board::Board;
use crate::shapes::PieceShape;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Check whether `shape` anchored at `(x, y)` can be placed on `board`.
///
/// Every mino must land inside the columns and above the floor. Rows above
/// the visible field (negative `y`) are always allowed so pieces can spawn
/// partly off-screen; anything else must be an empty cell.
pub fn fits(board: &Board, shape: &PieceShape, x: i8, y: i8) -> bool {
    shape.iter().all(|&(dx, dy)| {
        let px = x + dx;
        let py = y + dy;
        if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
            return false;
        }
        py < 0 || board.is_valid(px, py)
    })
}
