use std::rc::Rc;

use tracing::{debug, info};

use super::grid::Grid;
use super::player::{Seat, SharedPlayer};
use crate::error::{MoveError, SeatError};

/// Lifecycle of a game.
///
/// A game is `Invalid` until a grid and both players are assigned. It is
/// `Complete` once a player wins or no further move is possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    Invalid,
    InProgress,
    Complete,
}

/// What a successful move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSummary {
    pub seat: Seat,
    pub row: usize,
    pub column: usize,
    /// Cascade passes that cleared at least one disc.
    pub passes: usize,
    /// Discs removed by cascades during the move.
    pub cleared: usize,
    pub status: GameStatus,
}

/// Shared state behind every rule set: the owned grid, the two seated
/// players, the status and the turn counter.
#[derive(Debug, Default)]
pub struct Table {
    grid: Option<Grid>,
    player_one: Option<SharedPlayer>,
    player_two: Option<SharedPlayer>,
    status: GameStatus,
    turn: usize,
    winner: Option<Seat>,
}

impl Table {
    pub fn new() -> Self {
        Table::default()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Successful moves since the game started or was last restarted.
    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub(crate) fn grid_mut(&mut self) -> Option<&mut Grid> {
        self.grid.as_mut()
    }

    pub fn player(&self, seat: Seat) -> Option<&SharedPlayer> {
        match seat {
            Seat::One => self.player_one.as_ref(),
            Seat::Two => self.player_two.as_ref(),
        }
    }

    /// Seat recorded as the winner when a connection ended the game.
    pub fn winning_seat(&self) -> Option<Seat> {
        self.winner
    }

    /// Replace the grid. The previous grid is dropped; a seated game starts
    /// over on the new grid with the turn counter at zero.
    pub fn set_grid(&mut self, grid: Grid) {
        info!(
            rows = grid.row_count(),
            columns = grid.column_count(),
            "grid assigned"
        );
        let replaced = self.grid.replace(grid).is_some();
        if replaced {
            self.turn = 0;
            self.winner = None;
            if self.status == GameStatus::Complete {
                self.status = GameStatus::InProgress;
            }
        }
        self.promote();
    }

    /// Seat a player. A player already occupying the other seat is
    /// rejected and nothing changes.
    pub fn seat(&mut self, seat: Seat, player: SharedPlayer) -> Result<(), SeatError> {
        if let Some(other) = self.player(seat.other()) {
            if Rc::ptr_eq(other, &player) {
                return Err(SeatError::AlreadySeated(seat.other().name()));
            }
        }

        info!(seat = seat.name(), name = %player.borrow().name(), "player seated");
        match seat {
            Seat::One => self.player_one = Some(player),
            Seat::Two => self.player_two = Some(player),
        }
        self.promote();
        Ok(())
    }

    fn promote(&mut self) {
        if self.status == GameStatus::Invalid
            && self.grid.is_some()
            && self.player_one.is_some()
            && self.player_two.is_some()
        {
            debug!("game ready");
            self.status = GameStatus::InProgress;
        }
    }

    /// Clear the grid, zero both scores and the turn counter, and resume
    /// play. Has no effect on an `Invalid` game.
    pub fn restart(&mut self) {
        if self.status == GameStatus::Invalid {
            return;
        }
        if let Some(grid) = self.grid.as_mut() {
            grid.reset();
        }
        for player in [&self.player_one, &self.player_two].into_iter().flatten() {
            player.borrow_mut().reset_score();
        }
        self.turn = 0;
        self.winner = None;
        self.status = GameStatus::InProgress;
        info!("game restarted");
    }

    /// Seat whose move comes next; player one moves on even turns.
    pub fn next_seat(&self) -> Option<Seat> {
        if self.status != GameStatus::InProgress {
            return None;
        }
        if self.turn % 2 == 0 {
            Some(Seat::One)
        } else {
            Some(Seat::Two)
        }
    }

    pub fn next_player(&self) -> Option<SharedPlayer> {
        self.next_seat()
            .and_then(|seat| self.player(seat))
            .cloned()
    }

    /// Drop the acting seat's disc. On success returns the seat, the landing
    /// row and the grid for the rules to inspect.
    pub(crate) fn drop_disc(&mut self, column: usize) -> Result<(Seat, usize, &mut Grid), MoveError> {
        let seat = self.next_seat().ok_or(MoveError::NotInProgress)?;
        let grid = self.grid.as_mut().ok_or(MoveError::NotInProgress)?;
        let row = grid.insert_disc(column, seat.disc())?;
        debug!(seat = seat.name(), row, column, "disc dropped");
        Ok((seat, row, grid))
    }

    pub(crate) fn award_point(&self, seat: Seat) {
        if let Some(player) = self.player(seat) {
            player.borrow_mut().increase_score();
        }
    }

    pub(crate) fn award_win(&self, seat: Seat) {
        if let Some(player) = self.player(seat) {
            player.borrow_mut().increase_wins();
        }
    }

    pub(crate) fn score(&self, seat: Seat) -> u32 {
        self.player(seat).map_or(0, |p| p.borrow().score())
    }

    pub(crate) fn advance_turn(&mut self) {
        self.turn += 1;
    }

    pub(crate) fn complete(&mut self, winner: Option<Seat>) {
        if self.status != GameStatus::Complete {
            info!(winner = ?winner, turn = self.turn, "game complete");
        }
        self.status = GameStatus::Complete;
        if winner.is_some() {
            self.winner = winner;
        }
    }
}
