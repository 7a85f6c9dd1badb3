//! Core rules engine: the grid, players, and the classic and cascading
//! rule sets behind one [`ConnectGame`] contract.

mod cascade;
mod classic;
mod grid;
mod lines;
mod player;
mod rules;
mod state;

pub use cascade::{cascade_pass, PassOutcome, SuperGame};
pub use classic::Game;
pub use grid::{Cell, Grid, MIN_DIMENSION};
pub use lines::{Orientation, CONNECT};
pub use player::{Player, Seat, SharedPlayer};
pub use rules::{ConnectGame, Variant};
pub use state::{GameStatus, Table, TurnSummary};
