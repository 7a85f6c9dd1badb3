use std::fmt;

use super::cascade::SuperGame;
use super::classic::Game;
use super::grid::Grid;
use super::player::{Seat, SharedPlayer};
use super::state::{GameStatus, Table, TurnSummary};
use crate::error::{MoveError, SeatError};

/// Which rule set a game is played under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// First connection of four wins.
    #[default]
    Classic,
    /// Connections vanish and score; the higher score wins on a full grid.
    Super,
}

impl Variant {
    /// Create an empty game of this variant.
    pub fn new_game(self) -> Box<dyn ConnectGame> {
        match self {
            Variant::Classic => Box::new(Game::new()),
            Variant::Super => Box::new(SuperGame::new()),
        }
    }

    pub fn toggled(self) -> Variant {
        match self {
            Variant::Classic => Variant::Super,
            Variant::Super => Variant::Classic,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Classic => write!(f, "Connect Four"),
            Variant::Super => write!(f, "Super Connect Four"),
        }
    }
}

/// The contract shared by every rule set.
///
/// Setup, restart and the status queries are provided on top of the
/// implementor's [`Table`]; each rule set supplies its own move resolution
/// and winner.
pub trait ConnectGame {
    fn table(&self) -> &Table;

    fn table_mut(&mut self) -> &mut Table;

    fn variant(&self) -> Variant;

    /// Play the next player's disc into `column`.
    ///
    /// A rejected move returns an error and leaves the game, the grid and
    /// both players untouched.
    fn play_next_turn(&mut self, column: usize) -> Result<TurnSummary, MoveError>;

    /// The winning player of a completed game; `None` while in progress or
    /// when the game was drawn.
    fn winner(&self) -> Option<SharedPlayer>;

    /// Assign the grid, dropping any previous one.
    fn set_grid(&mut self, grid: Grid) {
        self.table_mut().set_grid(grid);
    }

    fn set_player_one(&mut self, player: SharedPlayer) -> Result<(), SeatError> {
        self.table_mut().seat(Seat::One, player)
    }

    fn set_player_two(&mut self, player: SharedPlayer) -> Result<(), SeatError> {
        self.table_mut().seat(Seat::Two, player)
    }

    fn restart(&mut self) {
        self.table_mut().restart();
    }

    fn status(&self) -> GameStatus {
        self.table().status()
    }

    fn next_player(&self) -> Option<SharedPlayer> {
        self.table().next_player()
    }

    fn grid(&self) -> Option<&Grid> {
        self.table().grid()
    }

    fn player(&self, seat: Seat) -> Option<&SharedPlayer> {
        self.table().player(seat)
    }

    fn turn(&self) -> usize {
        self.table().turn()
    }
}
