use std::cell::RefCell;
use std::rc::Rc;

use super::grid::Cell;

/// A player handle shared between the driver and a game. The game never
/// owns the player; it only keeps a clone of the handle while seated.
pub type SharedPlayer = Rc<RefCell<Player>>;

/// One of the two slots at a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    /// Get the other seat
    pub fn other(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    /// Convert seat to the disc it plays
    pub fn disc(self) -> Cell {
        match self {
            Seat::One => Cell::PlayerOne,
            Seat::Two => Cell::PlayerTwo,
        }
    }

    /// Seat owning a disc, if any
    pub fn of_disc(cell: Cell) -> Option<Seat> {
        match cell {
            Cell::PlayerOne => Some(Seat::One),
            Cell::PlayerTwo => Some(Seat::Two),
            Cell::Empty => None,
        }
    }

    /// Seat name for display
    pub fn name(self) -> &'static str {
        match self {
            Seat::One => "one",
            Seat::Two => "two",
        }
    }
}

/// A named player with a per-game score and a running win count.
///
/// Players are not `Clone`; a single record is shared through
/// [`SharedPlayer`].
#[derive(Debug, PartialEq, Eq)]
pub struct Player {
    name: String,
    score: u32,
    wins: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Player {
            name: name.into(),
            score: 0,
            wins: 0,
        }
    }

    /// Create a player already wrapped in a shareable handle.
    pub fn shared(name: impl Into<String>) -> SharedPlayer {
        Rc::new(RefCell::new(Player::new(name)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    pub fn increase_score(&mut self) {
        self.score += 1;
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn increase_wins(&mut self) {
        self.wins += 1;
    }
}
