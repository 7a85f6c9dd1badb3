use super::app::App;
use super::board_widget::board_lines;
use crate::game::{ConnectGame, GameStatus, Seat};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App) {
    let Some(game) = app.game.as_deref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(8),    // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, game, chunks[0]);
    render_board(frame, game, app.selected_column, chunks[1]);
    render_message(frame, &app.message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn seat_color(seat: Seat) -> Color {
    match seat {
        Seat::One => Color::Red,
        Seat::Two => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, game: &dyn ConnectGame, area: Rect) {
    let status = match game.status() {
        GameStatus::Complete => match game.winner() {
            Some(player) => format!("Game Over  |  {} wins", player.borrow().name()),
            None => "Game Over  |  Draw".to_string(),
        },
        _ => match game.next_player() {
            Some(player) => format!("Current Player: {}", player.borrow().name()),
            None => "Waiting for players".to_string(),
        },
    };
    let color = game
        .table()
        .next_seat()
        .map_or(Color::White, seat_color);

    let mut scores = Vec::new();
    for seat in [Seat::One, Seat::Two] {
        if let Some(player) = game.player(seat) {
            let player = player.borrow();
            if !scores.is_empty() {
                scores.push(Span::raw("   "));
            }
            scores.push(Span::styled(
                format!("\u{25cf} {}", player.name()),
                Style::default().fg(seat_color(seat)).add_modifier(Modifier::BOLD),
            ));
            scores.push(Span::raw(format!(
                "  score {}  wins {}",
                player.score(),
                player.wins()
            )));
        }
    }

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            status,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(scores),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(game.variant().to_string()),
    );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, game: &dyn ConnectGame, selected_column: usize, area: Rect) {
    let Some(grid) = game.grid() else {
        return;
    };
    let board_widget = Paragraph::new(board_lines(grid, Some(selected_column)))
        .alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("\u{2190}/\u{2192}: Move  |  Enter: Drop  |  R: Restart  |  Esc: Lobby  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
