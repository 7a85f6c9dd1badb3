use super::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(6),    // Roster
            Constraint::Length(4), // Settings
            Constraint::Length(3), // Message / name entry
            Constraint::Length(4), // Controls
        ])
        .split(frame.area());

    let title = Paragraph::new("Choose two players and press Enter to play")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));
    frame.render_widget(title, chunks[0]);

    render_roster(frame, app, chunks[1]);
    render_settings(frame, app, chunks[2]);
    render_message(frame, app, chunks[3]);
    render_controls(frame, chunks[4]);
}

fn render_roster(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app.roster.iter().enumerate().map(|(i, player)| {
        let player = player.borrow();
        let seat = if app.seat_one == Some(i) {
            "Player 1"
        } else if app.seat_two == Some(i) {
            "Player 2"
        } else {
            ""
        };
        let style = if i == app.cursor {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Row::new(vec![
            if i == app.cursor { "\u{25b6}" } else { " " }.to_string(),
            player.name().to_string(),
            player.score().to_string(),
            player.wins().to_string(),
            seat.to_string(),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Min(12),
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["", "Player", "Score", "Wins", "Seat"])
            .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)),
    )
    .block(Block::default().borders(Borders::ALL).title("Roster"));

    frame.render_widget(table, area);
}

fn render_settings(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(format!("Game: {}", app.variant)),
        Line::from(format!("Grid: {} rows x {} columns", app.rows, app.columns)),
    ];
    let settings = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Settings"));
    frame.render_widget(settings, area);
}

fn render_message(frame: &mut Frame, app: &App, area: Rect) {
    let (text, title) = match &app.name_input {
        Some(name) => (format!("{name}_"), "New player name"),
        None => (app.message.clone().unwrap_or_default(), ""),
    };
    let widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new(vec![
        Line::from("\u{2191}/\u{2193}: Select  |  1/2: Seat player  |  A: Add player  |  Enter: Play  |  Q: Quit"),
        Line::from("V: Toggle Super Connect Four  |  r/R: Rows -/+  |  c/C: Columns -/+"),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
