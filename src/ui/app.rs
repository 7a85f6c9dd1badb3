use crate::config::{AppConfig, MAX_DIMENSION};
use crate::error::MoveError;
use crate::game::{ConnectGame, GameStatus, Grid, Player, SharedPlayer, Variant, MIN_DIMENSION};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::rc::Rc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Lobby,
    Playing,
}

pub struct App {
    pub(super) roster: Vec<SharedPlayer>,
    pub(super) variant: Variant,
    pub(super) rows: usize,
    pub(super) columns: usize,
    pub(super) seat_one: Option<usize>,
    pub(super) seat_two: Option<usize>,
    pub(super) cursor: usize,
    pub(super) name_input: Option<String>,
    pub(super) game: Option<Box<dyn ConnectGame>>,
    pub(super) screen: Screen,
    pub(super) selected_column: usize,
    pub(super) message: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        App {
            roster: config.roster.players.iter().map(Player::shared).collect(),
            variant: config.variant,
            rows: config.grid.rows,
            columns: config.grid.columns,
            seat_one: None,
            seat_two: None,
            cursor: 0,
            name_input: None,
            game: None,
            screen: Screen::Lobby,
            selected_column: 0,
            message: None,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        if self.name_input.is_some() {
            self.handle_name_key(key);
            return;
        }

        match self.screen {
            Screen::Lobby => self.handle_lobby_key(key),
            Screen::Playing => self.handle_game_key(key),
        }
    }

    fn handle_name_key(&mut self, key: KeyEvent) {
        let Some(name) = self.name_input.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => name.push(c),
            KeyCode::Backspace => {
                name.pop();
            }
            KeyCode::Esc => self.name_input = None,
            KeyCode::Enter => {
                let name = name.trim().to_string();
                self.name_input = None;
                self.add_player(name);
            }
            _ => {}
        }
    }

    fn add_player(&mut self, name: String) {
        if name.is_empty() {
            self.message = Some("Name cannot be empty".to_string());
            return;
        }
        if self.roster.iter().any(|p| p.borrow().name() == name) {
            self.message = Some(format!("{name} is already on the roster"));
            return;
        }
        info!(name = %name, "player added to roster");
        self.message = Some(format!("Welcome, {name}!"));
        self.roster.push(Player::shared(name));
        self.cursor = self.roster.len() - 1;
    }

    fn handle_lobby_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.cursor + 1 < self.roster.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Char('1') => self.take_seat(true),
            KeyCode::Char('2') => self.take_seat(false),
            KeyCode::Char('a') => {
                self.name_input = Some(String::new());
            }
            KeyCode::Char('v') => {
                self.variant = self.variant.toggled();
            }
            KeyCode::Char('r') => self.rows = shrink(self.rows),
            KeyCode::Char('R') => self.rows = grow(self.rows),
            KeyCode::Char('c') => self.columns = shrink(self.columns),
            KeyCode::Char('C') => self.columns = grow(self.columns),
            KeyCode::Enter => self.start_game(),
            _ => {}
        }
    }

    fn take_seat(&mut self, one: bool) {
        let (seat, other) = if one {
            (&mut self.seat_one, self.seat_two)
        } else {
            (&mut self.seat_two, self.seat_one)
        };
        if other == Some(self.cursor) {
            self.message = Some("That player already has the other seat".to_string());
            return;
        }
        *seat = Some(self.cursor);
    }

    /// Build a fresh game from the lobby settings.
    fn start_game(&mut self) {
        let (Some(one), Some(two)) = (self.seat_one, self.seat_two) else {
            self.message = Some("Select player one (1) and player two (2) first".to_string());
            return;
        };

        let mut game = self.variant.new_game();
        game.set_grid(Grid::new(self.rows, self.columns));
        let seated = game
            .set_player_one(Rc::clone(&self.roster[one]))
            .and_then(|()| game.set_player_two(Rc::clone(&self.roster[two])));
        if let Err(e) = seated {
            self.message = Some(e.to_string());
            return;
        }
        game.restart();

        info!(variant = ?self.variant, rows = self.rows, columns = self.columns, "game started");
        self.selected_column = self.columns / 2;
        self.game = Some(game);
        self.screen = Screen::Playing;
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                self.screen = Screen::Lobby;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.columns {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                if let Some(game) = self.game.as_mut() {
                    game.restart();
                    self.selected_column = self.columns / 2;
                    self.message = Some("New game started!".to_string());
                }
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        let Some(game) = self.game.as_mut() else {
            return;
        };

        match game.play_next_turn(self.selected_column) {
            Ok(summary) => {
                debug!(?summary, "turn played");
                if summary.status == GameStatus::Complete {
                    self.message = Some(match game.winner() {
                        Some(player) => format!("{} wins!", player.borrow().name()),
                        None => "It's a draw!".to_string(),
                    });
                } else if summary.passes > 0 {
                    self.message = Some(format!(
                        "Cascade! {} discs vanished in {} pass{}",
                        summary.cleared,
                        summary.passes,
                        if summary.passes == 1 { "" } else { "es" }
                    ));
                }
            }
            Err(MoveError::ColumnFull(_)) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::InvalidColumn { .. }) | Err(MoveError::EmptyDisc) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::NotInProgress) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        match self.screen {
            Screen::Lobby => super::lobby_view::render(frame, self),
            Screen::Playing => super::game_view::render(frame, self),
        }
    }
}

fn shrink(value: usize) -> usize {
    value.saturating_sub(1).max(MIN_DIMENSION)
}

fn grow(value: usize) -> usize {
    (value + 1).min(MAX_DIMENSION)
}
