//! Active falling piece

use crate::tetromino::{Rotation, TetrominoType};

/// Column of the spawn anchor
pub const SPAWN_X: i32 = 3;
/// Row of the spawn anchor, above the visible board
pub const SPAWN_Y: i32 = -2;

/// An active falling piece
///
/// Moves are never applied in place: callers build a trial copy with
/// [`Piece::shifted`] or [`Piece::rotated_to`], probe it against the board,
/// and only replace the live piece when the probe is clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub piece_type: TetrominoType,
    /// Current rotation state
    pub rotation: Rotation,
    /// Anchor column (left edge of the 4x4 shape box)
    pub x: i32,
    /// Anchor row (top edge of the 4x4 shape box), negative above the board
    pub y: i32,
}

impl Piece {
    /// Create a new piece at the spawn anchor
    pub fn new(piece_type: TetrominoType) -> Self {
        Self {
            piece_type,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Get the absolute (x, y) positions of all 4 blocks
    pub fn blocks(&self) -> [(i32, i32); 4] {
        self.blocks_with(self.rotation, (0, 0))
    }

    /// Absolute blocks for a rotation and an extra offset from the anchor
    pub fn blocks_with(&self, rotation: Rotation, (ox, oy): (i32, i32)) -> [(i32, i32); 4] {
        self.piece_type
            .shape(rotation)
            .map(|(dx, dy)| (self.x + dx + ox, self.y + dy + oy))
    }

    /// A copy moved by (dx, dy)
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// A copy in another rotation state, moved by a kick offset
    pub fn rotated_to(&self, rotation: Rotation, (dx, dy): (i32, i32)) -> Self {
        Self {
            rotation,
            ..self.shifted(dx, dy)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_position() {
        let piece = Piece::new(TetrominoType::T);
        assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(piece.rotation, Rotation::North);
    }

    #[test]
    fn test_block_positions() {
        let piece = Piece::new(TetrominoType::O);
        assert_eq!(piece.blocks(), [(4, -2), (5, -2), (4, -1), (5, -1)]);
    }

    #[test]
    fn test_blocks_with_override() {
        let piece = Piece::new(TetrominoType::I);
        assert_eq!(
            piece.blocks_with(Rotation::East, (1, 3)),
            [(6, 1), (6, 2), (6, 3), (6, 4)]
        );
        // the live piece is untouched
        assert_eq!(piece.rotation, Rotation::North);
    }

    #[test]
    fn test_trial_copies_are_independent() {
        let piece = Piece::new(TetrominoType::L);
        let moved = piece.shifted(-1, 2);
        let turned = piece.rotated_to(Rotation::South, (1, 0));
        assert_eq!((moved.x, moved.y), (2, 0));
        assert_eq!((turned.x, turned.y, turned.rotation), (4, -2, Rotation::South));
        assert_eq!(piece, Piece::new(TetrominoType::L));
    }
}
