//! Super Rotation System (SRS) wall kick data
//!
//! SRS defines the wall kicks attempted when rotating a piece.
//! If a rotation would cause collision, these offsets are tried in order.

use crate::tetromino::{Rotation, RotationDirection, TetrominoType};

/// Get wall kick offsets for a rotation attempt
/// Returns 5 (dx, dy) pairs to try, in board coordinates (y grows downward)
pub fn get_wall_kicks(
    piece_type: TetrominoType,
    from: Rotation,
    direction: RotationDirection,
) -> [(i32, i32); 5] {
    match piece_type {
        TetrominoType::O => {
            // O piece doesn't rotate, but we return identity kicks
            [(0, 0); 5]
        }
        TetrominoType::I => i_piece_kicks(from, direction),
        _ => jlstz_kicks(from, direction),
    }
}

/// Wall kicks for J, L, S, T, Z pieces
fn jlstz_kicks(from: Rotation, direction: RotationDirection) -> [(i32, i32); 5] {
    use Rotation::*;
    use RotationDirection::*;

    match (from, direction) {
        // 0→R
        (North, Clockwise) => [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        // R→0
        (East, CounterClockwise) => [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
        // R→2
        (East, Clockwise) => [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
        // 2→R
        (South, CounterClockwise) => [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        // 2→L
        (South, Clockwise) => [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
        // L→2
        (West, CounterClockwise) => [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        // L→0
        (West, Clockwise) => [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        // 0→L
        (North, CounterClockwise) => [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    }
}

/// Wall kicks for I piece (different from other pieces)
fn i_piece_kicks(from: Rotation, direction: RotationDirection) -> [(i32, i32); 5] {
    use Rotation::*;
    use RotationDirection::*;

    match (from, direction) {
        // 0→R
        (North, Clockwise) => [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
        // R→0
        (East, CounterClockwise) => [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
        // R→2
        (East, Clockwise) => [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
        // 2→R
        (South, CounterClockwise) => [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
        // 2→L
        (South, Clockwise) => [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
        // L→2
        (West, CounterClockwise) => [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
        // L→0
        (West, Clockwise) => [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
        // 0→L
        (North, CounterClockwise) => [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTATIONS: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];
    const DIRECTIONS: [RotationDirection; 2] =
        [RotationDirection::Clockwise, RotationDirection::CounterClockwise];

    #[test]
    fn test_first_kick_is_identity() {
        for piece in TetrominoType::all() {
            for from in ROTATIONS {
                for dir in DIRECTIONS {
                    let kicks = get_wall_kicks(piece, from, dir);
                    assert_eq!(kicks[0], (0, 0));
                }
            }
        }
    }

    #[test]
    fn test_reverse_transition_negates_kicks() {
        // SRS tables are antisymmetric: A→B offsets are the negation of B→A offsets
        for piece in [TetrominoType::I, TetrominoType::T] {
            for from in ROTATIONS {
                let forward = get_wall_kicks(piece, from, RotationDirection::Clockwise);
                let back = get_wall_kicks(piece, from.cw(), RotationDirection::CounterClockwise);
                for (f, b) in forward.iter().zip(back.iter()) {
                    assert_eq!((f.0, f.1), (-b.0, -b.1), "{:?} from {:?}", piece, from);
                }
            }
        }
    }

    #[test]
    fn test_jlstz_share_a_table() {
        for from in ROTATIONS {
            for dir in DIRECTIONS {
                let t = get_wall_kicks(TetrominoType::T, from, dir);
                for piece in [TetrominoType::J, TetrominoType::L, TetrominoType::S, TetrominoType::Z] {
                    assert_eq!(get_wall_kicks(piece, from, dir), t);
                }
                assert_ne!(get_wall_kicks(TetrominoType::I, from, dir), t);
            }
        }
    }
}
