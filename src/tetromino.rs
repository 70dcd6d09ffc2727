//! Tetromino definitions and shapes
//!
//! All 7 tetrominoes with their four rotation states. Offsets are (dx, dy)
//! inside a 4x4 box anchored at the piece position, with y growing downward.

use ratatui::style::Color;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // Cyan - long bar
    J, // Blue - J-shape
    L, // Orange - L-shape
    O, // Yellow - square
    S, // Green - S-shape
    T, // Purple - T-shape
    Z, // Red - Z-shape
}

impl TetrominoType {
    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::Rgb(0, 240, 240),
            TetrominoType::J => Color::Rgb(0, 0, 240),
            TetrominoType::L => Color::Rgb(240, 160, 0),
            TetrominoType::O => Color::Rgb(240, 240, 0),
            TetrominoType::S => Color::Rgb(0, 240, 0),
            TetrominoType::T => Color::Rgb(160, 0, 240),
            TetrominoType::Z => Color::Rgb(240, 0, 0),
        }
    }

    /// Get all tetromino types for bag randomization
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::J,
            TetrominoType::L,
            TetrominoType::O,
            TetrominoType::S,
            TetrominoType::T,
            TetrominoType::Z,
        ]
    }

    /// Get the 4 (dx, dy) cell offsets for this tetromino at a given rotation
    pub fn shape(&self, rotation: Rotation) -> [(i32, i32); 4] {
        match self {
            TetrominoType::I => match rotation {
                Rotation::North => [(0, 1), (1, 1), (2, 1), (3, 1)],
                Rotation::East => [(2, 0), (2, 1), (2, 2), (2, 3)],
                Rotation::South => [(0, 2), (1, 2), (2, 2), (3, 2)],
                Rotation::West => [(1, 0), (1, 1), (1, 2), (1, 3)],
            },
            TetrominoType::J => match rotation {
                Rotation::North => [(0, 0), (0, 1), (1, 1), (2, 1)],
                Rotation::East => [(1, 0), (2, 0), (1, 1), (1, 2)],
                Rotation::South => [(0, 1), (1, 1), (2, 1), (2, 2)],
                Rotation::West => [(1, 0), (1, 1), (0, 2), (1, 2)],
            },
            TetrominoType::L => match rotation {
                Rotation::North => [(2, 0), (0, 1), (1, 1), (2, 1)],
                Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 2)],
                Rotation::South => [(0, 1), (1, 1), (2, 1), (0, 2)],
                Rotation::West => [(0, 0), (1, 0), (1, 1), (1, 2)],
            },
            // Same cells in every rotation state
            TetrominoType::O => [(1, 0), (2, 0), (1, 1), (2, 1)],
            // North: .SS    East: .S.    South: ...    West: S..
            //        SS.          .SS           .SS          SS.
            //                     ..S           SS.          .S.
            TetrominoType::S => match rotation {
                Rotation::North => [(1, 0), (2, 0), (0, 1), (1, 1)],
                Rotation::East => [(1, 0), (1, 1), (2, 1), (2, 2)],
                Rotation::South => [(1, 1), (2, 1), (0, 2), (1, 2)],
                Rotation::West => [(0, 0), (0, 1), (1, 1), (1, 2)],
            },
            TetrominoType::T => match rotation {
                Rotation::North => [(1, 0), (0, 1), (1, 1), (2, 1)],
                Rotation::East => [(1, 0), (1, 1), (2, 1), (1, 2)],
                Rotation::South => [(0, 1), (1, 1), (2, 1), (1, 2)],
                Rotation::West => [(1, 0), (0, 1), (1, 1), (1, 2)],
            },
            // North: ZZ.    East: ..Z    South: ...    West: .Z.
            //        .ZZ          .ZZ           ZZ.          ZZ.
            //                     .Z.           .ZZ          Z..
            TetrominoType::Z => match rotation {
                Rotation::North => [(0, 0), (1, 0), (1, 1), (2, 1)],
                Rotation::East => [(2, 0), (1, 1), (2, 1), (1, 2)],
                Rotation::South => [(0, 1), (1, 1), (1, 2), (2, 2)],
                Rotation::West => [(1, 0), (0, 1), (1, 1), (0, 2)],
            },
        }
    }

    /// Short label used in logs and the score file
    pub fn label(&self) -> char {
        match self {
            TetrominoType::I => 'I',
            TetrominoType::J => 'J',
            TetrominoType::L => 'L',
            TetrominoType::O => 'O',
            TetrominoType::S => 'S',
            TetrominoType::T => 'T',
            TetrominoType::Z => 'Z',
        }
    }
}

/// Rotation states (using SRS naming convention)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    North, // Spawn state
    East,  // Clockwise from North
    South, // 180 from North
    West,  // Counter-clockwise from North
}

impl Rotation {
    /// Rotate clockwise: North → East → South → West → North
    pub fn cw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise: North → West → South → East → North
    pub fn ccw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    pub fn rotated(&self, direction: RotationDirection) -> Rotation {
        match direction {
            RotationDirection::Clockwise => self.cw(),
            RotationDirection::CounterClockwise => self.ccw(),
        }
    }

    /// Rotation index 0..=3
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}
