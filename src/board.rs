//! Game board representation, collision detection and line clears

use crate::piece::Piece;
use crate::score::Score;
use crate::srs::get_wall_kicks;
use crate::tetromino::{RotationDirection, TetrominoType};
use std::time::Duration;

/// Board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// How long the TETRIS banner is shown after a four-row clear
pub const TETRIS_BANNER: Duration = Duration::from_millis(1200);

/// A board row; `Some` holds the kind of the locked block
pub type Row = [Option<TetrominoType>; BOARD_WIDTH];

/// The game board
#[derive(Debug, Clone)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top visible row
    cells: [Row; BOARD_HEIGHT],
    /// Score, lines and level bookkeeping
    pub score: Score,
    /// Set when a piece locks with a block above the visible board
    pub game_over: bool,
    /// Rows cleared by the most recent lock
    pub last_clear_rows: usize,
    /// Remaining time of the TETRIS banner
    pub tetris_banner: Duration,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[None; BOARD_WIDTH]; BOARD_HEIGHT],
            score: Score::new(),
            game_over: false,
            last_clear_rows: 0,
            tetris_banner: Duration::ZERO,
        }
    }

    /// Get the cell at (x, y), `None` when empty or out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<TetrominoType> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .flatten()
    }

    /// All rows, top first
    pub fn rows(&self) -> &[Row; BOARD_HEIGHT] {
        &self.cells
    }

    /// Whether any block of `piece` is out of bounds or overlaps the stack.
    ///
    /// Blocks above the board (y < 0) are never checked, not even against
    /// the side walls.
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.blocks().iter().any(|&(x, y)| {
            if y < 0 {
                return false;
            }
            if x < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
                return true;
            }
            self.get(x, y).is_some()
        })
    }

    /// Lock a piece onto the board, clear full rows and score them.
    ///
    /// Returns the indices of the cleared rows. A piece with any block above
    /// the board ends the game instead and leaves the grid untouched.
    pub fn lock(&mut self, piece: &Piece) -> Vec<usize> {
        let positions = piece.blocks();
        if positions.iter().any(|&(_, y)| y < 0) {
            self.game_over = true;
            self.last_clear_rows = 0;
            return Vec::new();
        }

        for (x, y) in positions {
            self.cells[y as usize][x as usize] = Some(piece.piece_type);
        }

        let cleared = self.clear_lines();
        self.score.add_clear(cleared.len());
        self.last_clear_rows = cleared.len();
        if cleared.len() == 4 {
            self.tetris_banner = TETRIS_BANNER;
        }
        cleared
    }

    /// Remove completed rows and return their indices.
    ///
    /// Surviving rows are compacted toward the bottom in their original order
    /// and the freed rows at the top are emptied.
    pub fn clear_lines(&mut self) -> Vec<usize> {
        let mut cleared = Vec::new();
        let mut write_row = BOARD_HEIGHT;

        for read_row in (0..BOARD_HEIGHT).rev() {
            if self.is_line_full(read_row) {
                cleared.push(read_row);
            } else {
                write_row -= 1;
                if write_row != read_row {
                    self.cells[write_row] = self.cells[read_row];
                }
            }
        }

        for row in &mut self.cells[..write_row] {
            *row = [None; BOARD_WIDTH];
        }

        cleared.reverse();
        cleared
    }

    /// Check if a line is completely filled
    fn is_line_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(Option::is_some)
    }

    /// Try to rotate `piece` using SRS wall kicks.
    ///
    /// Returns the first kicked placement that fits, or `None` when every
    /// candidate collides. The O piece never changes.
    pub fn rotate(&self, piece: &Piece, direction: RotationDirection) -> Option<Piece> {
        if piece.piece_type == TetrominoType::O {
            return None;
        }

        let target = piece.rotation.rotated(direction);
        get_wall_kicks(piece.piece_type, piece.rotation, direction)
            .into_iter()
            .map(|kick| piece.rotated_to(target, kick))
            .find(|trial| !self.collides(trial))
    }

    /// Resting placement of `piece` if dropped straight down
    pub fn drop_position(&self, piece: &Piece) -> Piece {
        let mut landed = *piece;
        loop {
            let next = landed.shifted(0, 1);
            if self.collides(&next) {
                return landed;
            }
            landed = next;
        }
    }

    /// Count down the TETRIS banner
    pub fn decay_banner(&mut self, elapsed: Duration) {
        self.tetris_banner = self.tetris_banner.saturating_sub(elapsed);
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, x: usize, y: usize, cell: Option<TetrominoType>) {
        self.cells[y][x] = cell;
    }
}
