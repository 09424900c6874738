//! Terminal UI rendering with ratatui

use crate::game::GameEngine;
use crate::piece::Piece;
use crate::settings::Settings;
use crate::store::HighScoreStore;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Locked blocks carry no piece identity, so they share one color
const LOCKED_COLOR: Color = Color::Gray;

/// Total width needed: board(22) + next/stats(18) = 40
const GAME_WIDTH: u16 = 40;

/// Render the whole game screen
pub fn render_game<S: HighScoreStore>(frame: &mut Frame, game: &GameEngine<S>, settings: &Settings) {
    let area = frame.area();
    let board = game.board();
    // Two characters per cell plus the borders
    let board_width = board.width() as u16 * 2 + 2;
    let board_height = board.height() as u16 + 2;

    let game_area = center_rect(area, GAME_WIDTH.max(board_width + 18), board_height);

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Length(18)])
        .split(game_area);

    render_board(frame, main_layout[0], game, settings);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(8)])
        .split(main_layout[1]);

    render_next(frame, right_layout[0], game.preview(), settings);
    render_stats(frame, right_layout[1], game);

    if game.is_game_over() {
        render_overlay(
            frame,
            area,
            "GAME OVER",
            &format!("Score: {}", game.score()),
            "R restart  Q quit",
        );
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

/// Render the board with the active piece on top
fn render_board<S: HighScoreStore>(
    frame: &mut Frame,
    area: Rect,
    game: &GameEngine<S>,
    settings: &Settings,
) {
    let (block_char, empty_char) = settings.visual.block_chars();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let active = game
        .active()
        .filter(|_| !game.is_game_over())
        .map(|piece| (piece.kind.color(), piece.block_positions()));

    let lines: Vec<Line> = game
        .board()
        .rows()
        .enumerate()
        .map(|(row, cells)| {
            let spans: Vec<Span> = cells
                .iter()
                .enumerate()
                .map(|(col, &filled)| {
                    let pos = (row as i32, col as i32);
                    match &active {
                        Some((color, blocks)) if blocks.contains(&pos) => {
                            Span::styled(block_char, Style::default().fg(*color))
                        }
                        _ if filled => Span::styled(block_char, Style::default().fg(LOCKED_COLOR)),
                        _ => Span::styled(empty_char, Style::default().fg(Color::DarkGray)),
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the next piece box
fn render_next(frame: &mut Frame, area: Rect, piece: &Piece, settings: &Settings) {
    let (block_char, _) = settings.visual.block_chars();

    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let style = Style::default().fg(piece.kind.color());
    let shape = &piece.shape;
    let lines: Vec<Line> = (0..shape.height())
        .map(|r| {
            let spans: Vec<Span> = (0..shape.width())
                .map(|c| {
                    if shape.is_filled(r, c) {
                        Span::styled(block_char, style)
                    } else {
                        Span::raw("  ")
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render score panel
fn render_stats<S: HighScoreStore>(frame: &mut Frame, area: Rect, game: &GameEngine<S>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White).bold();

    let mut lines = vec![
        Line::styled("SCORE", label),
        Line::styled(game.score().to_string(), value),
        Line::styled("BEST", label),
        Line::styled(game.high_score().to_string(), value),
        Line::styled("LINES", label),
        Line::styled(game.lines().to_string(), value),
    ];
    if let Some(action) = game.last_action() {
        lines.push(Line::styled(action, Style::default().fg(Color::Yellow).bold()));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render a centered popup
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str, hint: &str) {
    let popup_area = center_rect(area, 24, 7);

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
        Line::styled(subtitle, Style::default().fg(Color::White)),
        Line::raw(""),
        Line::styled(hint, Style::default().fg(Color::DarkGray)),
    ];

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(game: &GameEngine) -> String {
        let backend = TestBackend::new(60, 26);
        let mut terminal = Terminal::new(backend).unwrap();
        let settings = Settings::default();
        terminal
            .draw(|frame| render_game(frame, game, &settings))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_stats() {
        let mut game = GameEngine::with_seed(MemoryStore::with_value(700), 1);
        game.spawn_piece();
        let screen = draw(&game);
        assert!(screen.contains("NEXT"));
        assert!(screen.contains("SCORE"));
        assert!(screen.contains("700"));
        assert!(!screen.contains("GAME OVER"));
    }

    #[test]
    fn test_renders_game_over() {
        let mut game = GameEngine::with_seed(MemoryStore::new(), 2);
        game.spawn_piece();
        while game.tick() != crate::game::TickOutcome::GameOver {}
        let screen = draw(&game);
        assert!(screen.contains("GAME OVER"));
    }
}
