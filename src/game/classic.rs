use tracing::{debug, info};

use super::player::SharedPlayer;
use super::rules::{ConnectGame, Variant};
use super::state::{GameStatus, Table, TurnSummary};
use crate::error::MoveError;

/// Standard Connect Four: players alternate, starting with player one, and
/// the first to connect four discs wins. A full grid with no connection is
/// a draw.
#[derive(Debug, Default)]
pub struct Game {
    table: Table,
}

impl Game {
    pub fn new() -> Self {
        Game::default()
    }
}

impl ConnectGame for Game {
    fn table(&self) -> &Table {
        &self.table
    }

    fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    fn variant(&self) -> Variant {
        Variant::Classic
    }

    fn play_next_turn(&mut self, column: usize) -> Result<TurnSummary, MoveError> {
        let (seat, row, grid) = self.table.drop_disc(column)?;
        let connected = grid.connects(row, column);
        let cells = grid.cell_count();

        if connected {
            info!(seat = seat.name(), row, column, "connection made");
            self.table.award_point(seat);
            self.table.award_win(seat);
            self.table.complete(Some(seat));
        }

        self.table.advance_turn();
        if self.table.turn() == cells {
            debug!("grid exhausted");
            self.table.complete(None);
        }

        Ok(TurnSummary {
            seat,
            row,
            column,
            passes: 0,
            cleared: 0,
            status: self.table.status(),
        })
    }

    fn winner(&self) -> Option<SharedPlayer> {
        if self.table.status() != GameStatus::Complete {
            return None;
        }
        self.table
            .winning_seat()
            .and_then(|seat| self.table.player(seat))
            .cloned()
    }
}
