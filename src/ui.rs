//! Terminal UI rendering with ratatui

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::Game;
use crate::piece::Piece;
use crate::settings::Settings;
use crate::tetromino::{Rotation, TetrominoType};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const EMPTY: &str = "  ";

/// Total width needed: hold/stats(18) + board(22) + next/history(20) = 60
const GAME_WIDTH: u16 = 60;
/// Total height needed: board(20) + 2 for borders + title
const GAME_HEIGHT: u16 = 23;
/// Number of recent runs listed under the queue
const HISTORY_ROWS: usize = 5;

/// Render the whole game screen
pub fn render_game(frame: &mut Frame, game: &Game, settings: &Settings, floater: Option<&str>) {
    let area = frame.area();
    let (block_char, ghost_char) = settings.visual.block_chars();

    // Center the game area
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(22)])
        .split(game_area);

    frame.render_widget(
        Paragraph::new(Line::styled("BLOCKFALL", Style::default().fg(Color::Yellow).bold()))
            .alignment(Alignment::Center),
        rows[0],
    );

    // Create main layout: hold + stats | board | next + history
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(18), // Hold box and stats
            Constraint::Length(BOARD_WIDTH as u16 * 2 + 2), // Board plus borders
            Constraint::Length(20), // Next queue and history
        ])
        .split(rows[1]);

    let left_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(10)])
        .split(main_layout[0]);

    render_hold(frame, left_layout[0], game.hold_piece(), block_char);
    render_stats(frame, left_layout[1], game);

    let ghost = settings
        .visual
        .show_ghost
        .then(|| game.ghost_piece())
        .flatten();
    render_board(frame, main_layout[1], game, ghost, (block_char, ghost_char));

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(4)])
        .split(main_layout[2]);

    render_next_queue(frame, right_layout[0], &game.preview(), block_char);
    render_history(frame, right_layout[1], game);

    if !game.banner_remaining().is_zero() {
        render_banner(frame, main_layout[1], "TETRIS!", Color::Yellow, 3);
    } else if let Some(text) = floater {
        render_banner(frame, main_layout[1], text, Color::Green, BOARD_HEIGHT as u16 / 3);
    }

    // Overlays
    if game.is_paused() {
        render_overlay(frame, area, "PAUSED", "Press P to resume");
    } else if game.is_game_over() {
        render_overlay(frame, area, "GAME OVER", "R to restart, Q to quit");
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the hold piece box
fn render_hold(frame: &mut Frame, area: Rect, hold: Option<TetrominoType>, block_char: &str) {
    let block = Block::default()
        .title(" HOLD ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(piece_type) = hold {
        render_mini_piece(frame, inner, piece_type, block_char);
    }
}

/// Render the next piece queue
fn render_next_queue(frame: &mut Frame, area: Rect, queue: &[TetrominoType], block_char: &str) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if queue.is_empty() {
        return;
    }

    let piece_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3); queue.len()])
        .split(inner);

    for (slot, &piece_type) in piece_areas.iter().zip(queue) {
        render_mini_piece(frame, *slot, piece_type, block_char);
    }
}

/// Render a small piece preview (for hold and next queue)
fn render_mini_piece(frame: &mut Frame, area: Rect, piece_type: TetrominoType, block_char: &str) {
    if area.height < 1 || area.width < 4 {
        return;
    }

    let color = piece_type.color();
    let shape = piece_type.shape(Rotation::North);

    // Normalize to the top-left of the occupied cells
    let min_x = shape.iter().map(|(x, _)| *x).min().unwrap_or(0);
    let min_y = shape.iter().map(|(_, y)| *y).min().unwrap_or(0);

    // Spawn-state shapes are at most 2 rows tall
    let lines: Vec<Line> = (0..2)
        .map(|dy| {
            let spans: Vec<Span> = (0..4)
                .map(|dx| {
                    if shape.contains(&(min_x + dx, min_y + dy)) {
                        Span::styled(block_char, Style::default().fg(color))
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Render the game board
fn render_board(
    frame: &mut Frame,
    area: Rect,
    game: &Game,
    ghost: Option<Piece>,
    (block_char, ghost_char): (&str, &str),
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let current = game.current_piece();
    let current_cells = current.blocks();
    let ghost_cells = ghost.map(|g| g.blocks());

    let style_for = |kind: TetrominoType| Style::default().fg(kind.color());
    let lines: Vec<Line> = (0i32..)
        .zip(game.board().rows())
        .map(|(y, row)| {
            let spans: Vec<Span> = (0i32..)
                .zip(row)
                .map(|(x, cell)| {
                    if current_cells.contains(&(x, y)) {
                        Span::styled(block_char, style_for(current.piece_type))
                    } else if let Some(kind) = *cell {
                        Span::styled(block_char, style_for(kind))
                    } else if ghost_cells.is_some_and(|cells| cells.contains(&(x, y))) {
                        Span::styled(ghost_char, Style::default().fg(Color::Gray).dim())
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let score = game.score();
    let high = game.high_score().max(score.points);
    let stat = |label: &'static str, value: String, color: Color| {
        [
            Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
            Line::from(Span::styled(value, Style::default().fg(color).bold())),
        ]
    };

    let mut lines = Vec::new();
    lines.extend(stat("SCORE", score.points.to_string(), Color::Yellow));
    lines.extend(stat("HIGH", high.to_string(), Color::Magenta));
    lines.extend(stat("LEVEL", score.level.to_string(), Color::Cyan));
    lines.extend(stat("LINES", score.lines.to_string(), Color::Green));
    lines.extend(stat(
        "DROP",
        format!("{}ms", game.fall_interval().as_millis()),
        Color::White,
    ));

    // Show last clear if any
    if let Some(clear) = game.last_clear() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(clear.text, Style::default().fg(Color::Magenta).bold()));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the most recent finished runs
fn render_history(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .title(" RECENT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = game
        .history()
        .iter()
        .rev()
        .take(HISTORY_ROWS)
        .map(|run| {
            Line::from(vec![
                Span::styled(format!("{:>7}", run.score), Style::default().fg(Color::White)),
                Span::styled(format!(" L{}", run.level), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    if lines.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::styled("no runs yet", Style::default().fg(Color::DarkGray))),
            inner,
        );
    } else {
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Render a one-line message across the board at `row`
fn render_banner(frame: &mut Frame, board_area: Rect, text: &str, color: Color, row: u16) {
    let banner_area = Rect {
        x: board_area.x + 1,
        y: board_area.y + 1 + row.min(board_area.height.saturating_sub(3)),
        width: board_area.width.saturating_sub(2),
        height: 1,
    }
    .intersection(frame.area());
    if banner_area.is_empty() {
        return;
    }
    let paragraph = Paragraph::new(Line::styled(text.to_string(), Style::default().fg(color).bold()))
        .alignment(Alignment::Center);
    frame.render_widget(Clear, banner_area);
    frame.render_widget(paragraph, banner_area);
}

/// Render an overlay (for pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 28u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scores::testing::MemoryStore;
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_renders_stats_and_overlay() {
        let mut game = Game::with_seed(Box::new(MemoryStore::default()), 3);
        let settings = Settings::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();

        terminal
            .draw(|frame| render_game(frame, &game, &settings, None))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("SCORE"));
        assert!(text.contains("NEXT"));
        assert!(!text.contains("PAUSED"));

        game.process_action(crate::game::Action::Pause);
        terminal
            .draw(|frame| render_game(frame, &game, &settings, Some("DOUBLE! +300")))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("PAUSED"));
        assert!(text.contains("DOUBLE!"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let game = Game::with_seed(Box::new(MemoryStore::default()), 3);
        let settings = Settings::default();
        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        terminal
            .draw(|frame| render_game(frame, &game, &settings, Some("+100")))
            .unwrap();
    }
}
