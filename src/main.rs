//! BLOCKFALL - a falling-block puzzle game for the terminal
//!
//! 10x20 board, 7-bag randomizer, SRS wall kicks, hold and a three-piece
//! preview. Finished runs are recorded in a small JSON score file.

mod bag;
mod board;
mod game;
mod input;
mod piece;
mod score;
mod scores;
mod settings;
mod srs;
mod tetromino;
mod ui;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use game::{Game, GameEvent};
use input::InputHandler;
use ratatui::{Terminal, backend::CrosstermBackend};
use scores::{JsonScoreFile, ScoreStore};
use settings::Settings;
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // The terminal belongs to the UI, so logs go to a file
    let log_dir = blockfall_temp_dir();
    let file_appender = tracing_appender::rolling::never(&log_dir, "blockfall.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blockfall=debug")),
        )
        .with_ansi(false)
        .init();

    tracing::info!("BLOCKFALL starting up, log={}", log_dir.join("blockfall.log").display());

    let settings = Settings::load();

    let store = match &settings.gameplay.score_file {
        Some(path) => JsonScoreFile::at(path),
        None => JsonScoreFile::default_location(),
    };
    match store.path() {
        Some(path) => tracing::info!("Recording runs in {}", path.display()),
        None => tracing::warn!("No data directory available, runs will not be recorded"),
    }
    let store: Box<dyn ScoreStore> = Box::new(store);
    let mut game = match settings.gameplay.seed {
        Some(seed) => {
            tracing::info!("Using fixed seed {}", seed);
            Game::with_seed(store, seed)
        }
        None => Game::new(store),
    };

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app and capture result
    let result = run_app(&mut terminal, &mut game, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    // Write the settings back so a first run leaves an editable file behind
    if let Err(e) = settings.save() {
        tracing::warn!("Could not save settings: {}", e);
    }

    if result.is_ok() {
        let score = game.score();
        if game.is_game_over() {
            println!("\nGame over.");
        }
        println!("\nThanks for playing BLOCKFALL!");
        println!("Final Score: {}", score.points);
        println!("Level: {} | Lines: {}", score.level, score.lines);
        println!("High Score: {}", game.high_score().max(score.points));
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    settings: &Settings,
) -> io::Result<()> {
    let input = InputHandler::from_settings(settings);
    let mut last_frame = Instant::now();
    // Floating line-clear text and when it disappears
    let mut floater: Option<(&'static str, Instant)> = None;

    loop {
        // Render
        terminal.draw(|frame| ui::render_game(frame, game, settings, floater.map(|(text, _)| text)))?;

        // Handle input
        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = input.key_down(key) {
                        game.process_action(action);
                        tracing::trace!("{:?} -> {:?}", action, game.state());
                    }
                }
            }
        }

        if game.should_quit() {
            tracing::info!("Quit requested");
            return Ok(());
        }

        // Advance gravity by the real time since the last frame
        let now = Instant::now();
        game.tick(now.duration_since(last_frame));
        last_frame = now;

        for event in game.drain_events() {
            match event {
                GameEvent::LineClear(clear) => {
                    tracing::debug!("Cleared {} rows, banner {:?}", clear.rows, clear.banner);
                    floater = Some((clear.text, now + clear.floater));
                }
                GameEvent::GameOver { score, level } => {
                    tracing::info!("Run finished with {} points at level {}", score, level);
                }
            }
        }

        if floater.is_some_and(|(_, until)| now >= until) {
            floater = None;
        }
    }
}
