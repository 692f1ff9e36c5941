//! Shape catalog - precomputed rotation states for the seven tetrominoes
//!
//! Every kind has a square bounding box (I = 4, O = 2, the rest 3) and a
//! fixed list of rotation states inside that box. Rotation is always
//! clockwise and cycles through the list, so there is no runtime matrix
//! transform to get wrong.
//!
//! | Kind | Box | States |
//! |------|-----|--------|
//! | I | 4 | 2 |
//! | O | 2 | 1 |
//! | T, J, L | 3 | 4 |
//! | S, Z | 3 | 2 |

use crate::types::{PieceKind, KICK_OFFSETS};

/// Offset of a single mino from the piece anchor, as (column, row)
pub type MinoOffset = (i8, i8);

/// One rotation state - 4 mino offsets inside the bounding box
pub type PieceShape = [MinoOffset; 4];

/// Largest bounding box in the catalog (the I piece)
pub const MAX_BOX: usize = 4;

/// Boolean occupancy grid of one rotation state, padded to [`MAX_BOX`].
pub type ShapeMatrix = [[bool; MAX_BOX]; MAX_BOX];

const I_STATES: [PieceShape; 2] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
];

const O_STATES: [PieceShape; 1] = [[(0, 0), (1, 0), (0, 1), (1, 1)]];

const T_STATES: [PieceShape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_STATES: [PieceShape; 2] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
];

const Z_STATES: [PieceShape; 2] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
];

const J_STATES: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_STATES: [PieceShape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

/// All rotation states of a kind, in clockwise order
pub fn rotations(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
    }
}

/// Side length of the kind's bounding box
pub fn box_size(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::I => 4,
        PieceKind::O => 2,
        _ => 3,
    }
}

/// Get the shape for a kind and rotation index.
///
/// The index wraps, so any `u8` is accepted.
pub fn get_shape(kind: PieceKind, rotation: u8) -> PieceShape {
    let states = rotations(kind);
    states[rotation as usize % states.len()]
}

/// Index of the state after one clockwise turn
pub fn next_rotation(kind: PieceKind, rotation: u8) -> u8 {
    ((rotation as usize + 1) % rotations(kind).len()) as u8
}

/// Expand a rotation state into its occupancy grid (for previews).
pub fn shape_matrix(kind: PieceKind, rotation: u8) -> ShapeMatrix {
    let mut m = [[false; MAX_BOX]; MAX_BOX];
    for &(dx, dy) in get_shape(kind, rotation).iter() {
        m[dy as usize][dx as usize] = true;
    }
    m
}

/// Try to turn a piece one step clockwise.
///
/// The unmodified anchor is tried first, then each horizontal offset of
/// [`KICK_OFFSETS`] in order. Returns `(new_rotation, new_x)` for the first
/// placement `fits` accepts, or `None` if the piece cannot turn.
pub fn try_rotate(
    kind: PieceKind,
    rotation: u8,
    x: i8,
    y: i8,
    fits: impl Fn(&PieceShape, i8, i8) -> bool,
) -> Option<(u8, i8)> {
    let new_rotation = next_rotation(kind, rotation);
    let new_shape = get_shape(kind, new_rotation);

    std::iter::once(0)
        .chain(KICK_OFFSETS)
        .filter_map(|dx| x.checked_add(dx))
        .find(|&nx| fits(&new_shape, nx, y))
        .map(|nx| (new_rotation, nx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_stays_inside_its_box() {
        for kind in PieceKind::ALL {
            let size = box_size(kind) as i8;
            for shape in rotations(kind) {
                assert!(shape
                    .iter()
                    .all(|&(dx, dy)| (0..size).contains(&dx) && (0..size).contains(&dy)));
            }
        }
    }

    #[test]
    fn state_counts_follow_symmetry() {
        assert_eq!(rotations(PieceKind::O).len(), 1);
        assert_eq!(rotations(PieceKind::I).len(), 2);
        assert_eq!(rotations(PieceKind::S).len(), 2);
        assert_eq!(rotations(PieceKind::Z).len(), 2);
        assert_eq!(rotations(PieceKind::T).len(), 4);
        assert_eq!(rotations(PieceKind::J).len(), 4);
        assert_eq!(rotations(PieceKind::L).len(), 4);
    }

    #[test]
    fn states_have_no_duplicate_minos() {
        for kind in PieceKind::ALL {
            for shape in rotations(kind) {
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        assert_ne!(shape[i], shape[j], "{:?}", kind);
                    }
                }
            }
        }
    }

    #[test]
    fn rotation_index_wraps() {
        assert_eq!(next_rotation(PieceKind::T, 3), 0);
        assert_eq!(next_rotation(PieceKind::I, 1), 0);
        assert_eq!(next_rotation(PieceKind::O, 0), 0);
        assert_eq!(get_shape(PieceKind::S, 2), get_shape(PieceKind::S, 0));
    }

    #[test]
    fn matrix_marks_exactly_four_cells() {
        let m = shape_matrix(PieceKind::L, 0);
        let count = m.iter().flatten().filter(|&&b| b).count();
        assert_eq!(count, 4);
        assert!(m[0][2]);
        assert!(m[1][0] && m[1][1] && m[1][2]);
    }

    #[test]
    fn try_rotate_prefers_unkicked_anchor() {
        let r = try_rotate(PieceKind::T, 0, 4, 5, |_, _, _| true);
        assert_eq!(r, Some((1, 4)));
    }

    #[test]
    fn try_rotate_walks_kicks_in_order() {
        // Only x = 6 (kick +2) is accepted.
        let r = try_rotate(PieceKind::J, 0, 4, 0, |_, x, _| x == 6);
        assert_eq!(r, Some((1, 6)));

        // Both -1 and +1 fit; -1 comes first.
        let r = try_rotate(PieceKind::J, 0, 4, 0, |_, x, _| x == 3 || x == 5);
        assert_eq!(r, Some((1, 3)));
    }

    #[test]
    fn try_rotate_gives_up_after_last_kick() {
        let r = try_rotate(PieceKind::Z, 0, 4, 0, |_, x, _| x == 7);
        assert_eq!(r, None);
    }
}
