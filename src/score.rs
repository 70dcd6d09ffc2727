//! Classic scoring and level progression

use std::time::Duration;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;
/// Gravity interval at level 0
pub const INITIAL_FALL_MS: u64 = 800;
/// Interval reduction per level
pub const LEVEL_SPEEDUP_MS: u64 = 60;
/// Gravity never gets faster than this
pub const MIN_FALL_MS: u64 = 70;

/// Scoring state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total lines cleared
    pub lines: u32,
    /// Current level, starts at 0
    pub level: u32,
}

/// Base points for a clear of `rows` lines at `level`
pub fn award(rows: usize, level: u32) -> u64 {
    let base = match rows {
        1 => 100,
        2 => 300,
        3 => 500,
        4 => 800,
        _ => 0,
    };
    base * (level as u64 + 1)
}

/// Feedback text for a clear of `rows` lines
pub fn clear_text(rows: usize) -> Option<&'static str> {
    match rows {
        1 => Some("+100"),
        2 => Some("DOUBLE! +300"),
        3 => Some("TRIPLE! +500"),
        4 => Some("TETRIS! +800"),
        _ => None,
    }
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a line clear, returning the points awarded
    pub fn add_clear(&mut self, rows: usize) -> u64 {
        if rows == 0 {
            return 0;
        }
        let points = award(rows, self.level);
        self.points += points;
        self.lines += rows as u32;

        let new_level = self.lines / LINES_PER_LEVEL;
        if new_level > self.level {
            self.level = new_level;
        }
        points
    }

    /// Gravity interval for the current level
    pub fn fall_interval(&self) -> Duration {
        let speedup = LEVEL_SPEEDUP_MS.saturating_mul(self.level as u64);
        Duration::from_millis(INITIAL_FALL_MS.saturating_sub(speedup).max(MIN_FALL_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_clear() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(1), 100);
        assert_eq!(score.points, 100);
        assert_eq!(score.lines, 1);
    }

    #[test]
    fn test_tetris() {
        let mut score = Score::new();
        score.add_clear(4);
        assert_eq!(score.points, 800);
        assert_eq!(score.lines, 4);
    }

    #[test]
    fn test_level_multiplier() {
        let mut score = Score {
            points: 0,
            lines: 20,
            level: 2,
        };
        assert_eq!(score.add_clear(1), 300);
    }

    #[test]
    fn test_zero_rows_is_noop() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(0), 0);
        assert_eq!(score, Score::new());
    }

    #[test]
    fn test_level_up() {
        let mut score = Score::new();
        for _ in 0..10 {
            score.add_clear(1);
        }
        assert_eq!(score.level, 1);
        assert_eq!(score.fall_interval(), Duration::from_millis(740));
    }

    #[test]
    fn test_fall_interval_floor() {
        let score = Score {
            points: 0,
            lines: 500,
            level: 50,
        };
        assert_eq!(score.fall_interval(), Duration::from_millis(MIN_FALL_MS));
    }

    #[test]
    fn test_clear_text() {
        assert_eq!(clear_text(0), None);
        assert_eq!(clear_text(4), Some("TETRIS! +800"));
    }
}
