//! Core game state and logic

use crate::bag::Bag;
use crate::board::{Board, TETRIS_BANNER};
use crate::piece::Piece;
use crate::score::{Score, clear_text};
use crate::scores::{RunEntry, ScoreRecord, ScoreStore, timestamp_now};
use crate::tetromino::{RotationDirection, TetrominoType};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

/// Suggested lifetime of the floating score text after a clear
pub const FLOATER_DURATION: Duration = Duration::from_millis(1000);

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCW,
    RotateCCW,
    Hold,
    Pause,
    Reset,
    Quit,
}

/// Feedback for a lock that cleared rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClearEvent {
    pub rows: usize,
    /// Floating text hint, e.g. "DOUBLE! +300"
    pub text: &'static str,
    /// How long the floating text should stay up
    pub floater: Duration,
    /// Set for a four-row clear: how long to show the TETRIS banner
    pub banner: Option<Duration>,
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    LineClear(LineClearEvent),
    GameOver { score: u64, level: u32 },
}

/// The main game struct
pub struct Game {
    /// The game board, including score bookkeeping
    board: Board,
    /// Current falling piece
    current_piece: Piece,
    /// Held piece (can swap once per piece)
    hold_piece: Option<TetrominoType>,
    /// Whether hold has been used this piece
    hold_used: bool,
    /// Piece bag randomizer
    bag: Bag,
    /// Current game state
    state: GameState,
    /// Time accumulated toward the next gravity step
    drop_timer: Duration,
    /// Gravity interval for the current level
    fall_interval: Duration,
    /// Seeds one bag per run so a seeded session stays reproducible across resets
    seeder: ChaCha8Rng,
    /// Events not yet drained by the presentation layer
    events: Vec<GameEvent>,
    /// Most recent line clear
    last_clear: Option<LineClearEvent>,
    /// Whether the current run has been recorded
    run_recorded: bool,
    quit_requested: bool,
    /// High score and history as of the last recorded run
    scores: ScoreRecord,
    store: Box<dyn ScoreStore>,
}

impl Game {
    /// Create a new game recording finished runs into `store`
    pub fn new(store: Box<dyn ScoreStore>) -> Self {
        Self::with_seed(store, rand::random())
    }

    /// Create a new game with a deterministic piece sequence
    pub fn with_seed(store: Box<dyn ScoreStore>, seed: u64) -> Self {
        let mut seeder = ChaCha8Rng::seed_from_u64(seed);
        let mut bag = Bag::with_seed(seeder.next_u64());
        let first_piece = bag.next();
        let board = Board::new();
        let scores = store.load();
        tracing::debug!("Loaded score record: high={} runs={}", scores.high, scores.history.len());

        Self {
            fall_interval: board.score.fall_interval(),
            board,
            current_piece: Piece::new(first_piece),
            hold_piece: None,
            hold_used: false,
            bag,
            state: GameState::Playing,
            drop_timer: Duration::ZERO,
            seeder,
            events: Vec::new(),
            last_clear: None,
            run_recorded: false,
            quit_requested: false,
            scores,
            store,
        }
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.quit_requested = true;
                return;
            }
            Action::Reset => {
                self.reset();
                return;
            }
            Action::Pause => {
                self.state = match self.state {
                    GameState::Playing => GameState::Paused,
                    GameState::Paused => GameState::Playing,
                    GameState::GameOver => GameState::GameOver,
                };
                return;
            }
            _ => {}
        }

        if self.state != GameState::Playing {
            return;
        }

        match action {
            Action::MoveLeft => {
                self.try_move(-1, 0);
            }
            Action::MoveRight => {
                self.try_move(1, 0);
            }
            Action::SoftDrop => {
                self.try_move(0, 1);
            }
            Action::HardDrop => self.hard_drop(),
            Action::RotateCW => self.rotate(RotationDirection::Clockwise),
            Action::RotateCCW => self.rotate(RotationDirection::CounterClockwise),
            Action::Hold => self.hold(),
            Action::Pause | Action::Reset | Action::Quit => {}
        }
    }

    /// Advance gravity by `elapsed` (call every frame)
    pub fn tick(&mut self, elapsed: Duration) {
        if self.state != GameState::Playing {
            return;
        }

        self.drop_timer += elapsed;
        while self.drop_timer >= self.fall_interval {
            self.drop_timer -= self.fall_interval;
            if !self.try_move(0, 1) {
                // The piece that owned the remaining time is gone
                self.lock_piece();
                break;
            }
        }

        self.board.decay_banner(elapsed);
    }

    /// Start a fresh run, recording the current one if it was still going
    pub fn reset(&mut self) {
        if !self.run_recorded {
            self.record_run();
        }
        tracing::info!("Starting new run");

        self.board = Board::new();
        self.bag = Bag::with_seed(self.seeder.next_u64());
        self.current_piece = Piece::new(self.bag.next());
        self.hold_piece = None;
        self.hold_used = false;
        self.state = GameState::Playing;
        self.drop_timer = Duration::ZERO;
        self.fall_interval = self.board.score.fall_interval();
        self.last_clear = None;
        self.run_recorded = false;
    }

    /// Move the current piece if the target placement is free
    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let trial = self.current_piece.shifted(dx, dy);
        if self.board.collides(&trial) {
            return false;
        }
        self.current_piece = trial;
        true
    }

    fn hard_drop(&mut self) {
        self.current_piece = self.board.drop_position(&self.current_piece);
        self.lock_piece();
    }

    fn rotate(&mut self, direction: RotationDirection) {
        if let Some(rotated) = self.board.rotate(&self.current_piece, direction) {
            self.current_piece = rotated;
        }
    }

    fn hold(&mut self) {
        if self.hold_used {
            return;
        }

        let current = self.current_piece.piece_type;
        match self.hold_piece.replace(current) {
            None => self.spawn_next(),
            Some(held) => {
                self.current_piece = Piece::new(held);
                if self.board.collides(&self.current_piece) {
                    self.end_game();
                }
            }
        }
        self.hold_used = true;
    }

    /// Lock the current piece and spawn next
    fn lock_piece(&mut self) {
        let piece = self.current_piece;
        let cleared = self.board.lock(&piece);
        tracing::debug!(
            "Locked {} at ({}, {}) rotation {}, cleared {:?}",
            piece.piece_type.label(),
            piece.x,
            piece.y,
            piece.rotation.index(),
            cleared
        );

        let rows = cleared.len();
        if let Some(text) = clear_text(rows) {
            let event = LineClearEvent {
                rows,
                text,
                floater: FLOATER_DURATION,
                banner: (rows == 4).then_some(TETRIS_BANNER),
            };
            self.last_clear = Some(event.clone());
            self.events.push(GameEvent::LineClear(event));
        }

        self.fall_interval = self.board.score.fall_interval();
        self.hold_used = false;

        if self.board.game_over {
            self.end_game();
        } else {
            self.spawn_next();
        }
    }

    /// Take the next piece from the queue into the spawn position
    fn spawn_next(&mut self) {
        self.current_piece = Piece::new(self.bag.next());
        self.hold_used = false;
        if self.board.collides(&self.current_piece) {
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        self.board.game_over = true;
        self.state = GameState::GameOver;
        tracing::info!(
            "Game over: score={} level={} lines={}",
            self.board.score.points,
            self.board.score.level,
            self.board.score.lines
        );
        self.events.push(GameEvent::GameOver {
            score: self.board.score.points,
            level: self.board.score.level,
        });
        self.record_run();
    }

    /// Append the run to the stored history; runs at most once per game
    fn record_run(&mut self) {
        if self.run_recorded {
            return;
        }
        self.run_recorded = true;

        let mut record = self.store.load();
        record.finalize(self.board.score.points, self.board.score.level, timestamp_now());
        self.store.save(&record);
        self.scores = record;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> &Piece {
        &self.current_piece
    }

    /// Where the current piece would land, if that is not above it
    pub fn ghost_piece(&self) -> Option<Piece> {
        let ghost = self.board.drop_position(&self.current_piece);
        (ghost.y >= self.current_piece.y).then_some(ghost)
    }

    pub fn hold_piece(&self) -> Option<TetrominoType> {
        self.hold_piece
    }

    /// Get preview of next pieces
    pub fn preview(&self) -> Vec<TetrominoType> {
        self.bag.preview()
    }

    pub fn score(&self) -> &Score {
        &self.board.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == GameState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Best recorded score
    pub fn high_score(&self) -> u64 {
        self.scores.high
    }

    /// Recorded runs, oldest first
    pub fn history(&self) -> &[RunEntry] {
        &self.scores.history
    }

    pub fn fall_interval(&self) -> Duration {
        self.fall_interval
    }

    pub fn banner_remaining(&self) -> Duration {
        self.board.tetris_banner
    }

    pub fn last_clear(&self) -> Option<&LineClearEvent> {
        self.last_clear.as_ref()
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }
}
