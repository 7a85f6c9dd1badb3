//! Super Connect Four.
//!
//! Connections do not end the game. Every connection of four or more
//! vanishes, the discs above fall into the gap, and the falling discs may
//! form new connections. Each cascade pass that clears a player's discs
//! earns that player one point. The game ends when no column can take a
//! disc; the higher score takes the win.

use tracing::{debug, info};

use super::grid::Grid;
use super::lines::{Orientation, CONNECT};
use super::player::{Seat, SharedPlayer};
use super::rules::{ConnectGame, Variant};
use super::state::{GameStatus, Table, TurnSummary};
use crate::error::MoveError;

/// What one cascade pass removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassOutcome {
    pub cleared: usize,
    pub player_one: bool,
    pub player_two: bool,
}

impl PassOutcome {
    pub fn is_empty(&self) -> bool {
        self.cleared == 0
    }

    fn record(&mut self, seat: Seat, cleared: usize) {
        self.cleared += cleared;
        match seat {
            Seat::One => self.player_one = true,
            Seat::Two => self.player_two = true,
        }
    }

    /// Seats that had at least one connection cleared in this pass.
    pub fn scorers(&self) -> impl Iterator<Item = Seat> {
        [
            (Seat::One, self.player_one),
            (Seat::Two, self.player_two),
        ]
        .into_iter()
        .filter_map(|(seat, scored)| scored.then_some(seat))
    }
}

/// Clear every connection running through `(row, column)`.
///
/// Matched neighbours are cleared as each orientation is found; the seed
/// itself is cleared last so that every orientation through it is seen.
/// Returns the owning seat and the number of cells cleared.
fn clear_connections(grid: &mut Grid, row: usize, column: usize) -> Option<(Seat, usize)> {
    let disc = grid.cell_at(row, column);
    let seat = Seat::of_disc(disc)?;

    let mut cleared = 0;
    for orientation in Orientation::ALL {
        let run = grid.line_through(row, column, disc, orientation);
        if run.len() < CONNECT {
            continue;
        }
        for &(r, c) in &run[1..] {
            grid.make_empty_cell(c, r);
        }
        cleared += run.len() - 1;
    }

    if cleared == 0 {
        return None;
    }
    grid.make_empty_cell(column, row);
    Some((seat, cleared + 1))
}

/// Run one cascade pass over the grid.
///
/// Cells are visited in row-major order starting at the top-left, after
/// `first` when one is given. Connections are cleared as soon as they are
/// found, so later cells of the same pass see the cleared grid. The grid is
/// not compacted here.
pub fn cascade_pass(grid: &mut Grid, first: Option<(usize, usize)>) -> PassOutcome {
    let rows = grid.row_count();
    let columns = grid.column_count();
    let seeds = first
        .into_iter()
        .chain((0..rows).flat_map(|r| (0..columns).map(move |c| (r, c))));

    let mut outcome = PassOutcome::default();
    for (row, column) in seeds {
        if let Some((seat, cleared)) = clear_connections(grid, row, column) {
            outcome.record(seat, cleared);
        }
    }
    outcome
}

/// The cascading variant. See the module docs for the rules.
#[derive(Debug, Default)]
pub struct SuperGame {
    table: Table,
}

impl SuperGame {
    pub fn new() -> Self {
        SuperGame::default()
    }

    /// Seat with the strictly higher score, if any.
    fn leader(&self) -> Option<Seat> {
        let one = self.table.score(Seat::One);
        let two = self.table.score(Seat::Two);
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Some(Seat::One),
            std::cmp::Ordering::Less => Some(Seat::Two),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl ConnectGame for SuperGame {
    fn table(&self) -> &Table {
        &self.table
    }

    fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    fn variant(&self) -> Variant {
        Variant::Super
    }

    fn play_next_turn(&mut self, column: usize) -> Result<TurnSummary, MoveError> {
        let (seat, row, _) = self.table.drop_disc(column)?;

        let mut first = Some((row, column));
        let mut passes = 0;
        let mut cleared = 0;
        while let Some(grid) = self.table.grid_mut() {
            let pass = cascade_pass(grid, first.take());
            if pass.is_empty() {
                break;
            }
            grid.fall_down();

            passes += 1;
            cleared += pass.cleared;
            debug!(
                pass = passes,
                cleared = pass.cleared,
                player_one = pass.player_one,
                player_two = pass.player_two,
                "cascade pass"
            );
            for scorer in pass.scorers() {
                self.table.award_point(scorer);
            }
        }

        self.table.advance_turn();
        if self.table.grid().is_some_and(Grid::no_more_moves) {
            let leader = self.leader();
            info!(leader = ?leader, "no more moves");
            if let Some(leader) = leader {
                self.table.award_win(leader);
            }
            self.table.complete(leader);
        }

        Ok(TurnSummary {
            seat,
            row,
            column,
            passes,
            cleared,
            status: self.table.status(),
        })
    }

    fn winner(&self) -> Option<SharedPlayer> {
        if self.table.status() != GameStatus::Complete {
            return None;
        }
        self.leader()
            .and_then(|seat| self.table.player(seat))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Player};
    use std::rc::Rc;

    fn new_game(rows: usize, columns: usize) -> (SuperGame, SharedPlayer, SharedPlayer) {
        let mut game = SuperGame::new();
        let p1 = Player::shared("Nick");
        let p2 = Player::shared("Nasser");
        game.set_grid(Grid::new(rows, columns));
        game.set_player_one(Rc::clone(&p1)).unwrap();
        game.set_player_two(Rc::clone(&p2)).unwrap();
        (game, p1, p2)
    }

    fn play(game: &mut SuperGame, columns: &[usize]) {
        for &col in columns {
            game.play_next_turn(col).unwrap();
        }
    }

    /// Rows written with ' ' for empty cells, as rendered by `Grid`.
    fn pattern(rows: &[&str]) -> String {
        rows.iter()
            .map(|r| r.replace(' ', "."))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn board(game: &SuperGame) -> String {
        game.grid().unwrap().to_string()
    }

    fn is_next(game: &SuperGame, player: &SharedPlayer) -> bool {
        game.next_player().is_some_and(|p| Rc::ptr_eq(&p, player))
    }

    #[test]
    fn test_cascade_pass_on_settled_grid_clears_nothing() {
        let mut grid = Grid::new(6, 7);
        for col in 0..3 {
            grid.insert_disc(col, Cell::PlayerOne).unwrap();
        }
        let before = grid.clone();
        assert!(cascade_pass(&mut grid, None).is_empty());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_cascade_pass_clears_crossing_lines_through_seed() {
        let mut grid = Grid::new(6, 7);
        // bottom row 0..=3 and column 0 upwards share the corner disc
        for col in 0..4 {
            grid.insert_disc(col, Cell::PlayerTwo).unwrap();
        }
        for _ in 0..3 {
            grid.insert_disc(0, Cell::PlayerTwo).unwrap();
        }

        let pass = cascade_pass(&mut grid, Some((5, 0)));

        assert_eq!(pass.cleared, 7);
        assert!(pass.player_two);
        assert!(!pass.player_one);
        assert_eq!(pass.scorers().collect::<Vec<_>>(), vec![Seat::Two]);
        assert_eq!(grid.disc_count(), 0);
    }

    #[test]
    fn test_simple_connection_vanishes() {
        let (mut game, p1, p2) = new_game(6, 7);
        play(&mut game, &[0, 1, 1, 2, 2, 5, 3, 5, 3, 4]);

        let summary = game.play_next_turn(4).unwrap(); // p1

        assert_eq!(summary.passes, 1);
        assert_eq!(summary.cleared, 4);
        assert_eq!(
            board(&game),
            pattern(&[
                "       ",
                "       ",
                "       ",
                "       ",
                "     2 ",
                "122122 ",
            ])
        );
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(game.winner().is_none());
        assert!(is_next(&game, &p2));
        assert_eq!(p1.borrow().score(), 1);
        assert_eq!(p2.borrow().score(), 0);
    }

    #[test]
    fn test_falling_discs_score_for_both_players() {
        let (mut game, p1, p2) = new_game(6, 7);
        play(
            &mut game,
            &[0, 2, 1, 4, 3, 2, 3, 0, 5, 1, 6, 3, 5, 4, 3, 2, 2, 4, 4, 6, 3],
        );
        assert_eq!(
            board(&game),
            pattern(&[
                "       ",
                "   1   ",
                "  111  ",
                "  222  ",
                "2221212",
                "1121211",
            ])
        );

        game.play_next_turn(1).unwrap(); // p2

        assert_eq!(
            board(&game),
            pattern(&[
                "       ",
                "       ",
                "       ",
                "  1    ",
                "222 2  ",
                "112 212",
            ])
        );
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(game.winner().is_none());
        assert!(is_next(&game, &p1));
        assert_eq!(p1.borrow().score(), 1);
        assert_eq!(p2.borrow().score(), 1);
        assert_eq!(p1.borrow().wins(), 0);
        assert_eq!(p2.borrow().wins(), 0);
    }

    #[test]
    fn test_two_lines_through_placed_disc_clear_together() {
        let (mut game, p1, p2) = new_game(6, 7);
        play(
            &mut game,
            &[1, 0, 2, 3, 1, 0, 2, 4, 3, 4, 3, 2, 3, 1, 1, 4, 2, 3],
        );
        assert_eq!(
            board(&game),
            pattern(&[
                "       ",
                "   2   ",
                " 111   ",
                " 2212  ",
                "21112  ",
                "21122  ",
            ])
        );

        // completes a row and a diagonal at once
        game.play_next_turn(4).unwrap(); // p1

        assert_eq!(
            board(&game),
            pattern(&[
                "       ",
                "       ",
                "       ",
                "   22  ",
                "22212  ",
                "21122  ",
            ])
        );
        assert!(is_next(&game, &p2));
        assert_eq!(p1.borrow().score(), 1);
        assert_eq!(p2.borrow().score(), 0);
    }

    #[test]
    fn test_chained_cascade() {
        let (mut game, p1, p2) = new_game(6, 7);
        play(&mut game, &[0, 4, 2, 2, 3, 6, 4, 5, 5, 6, 2, 3, 3, 6]);
        assert_eq!(
            board(&game),
            pattern(&[
                "       ",
                "       ",
                "       ",
                "  11  2",
                "  22112",
                "1 11222",
            ])
        );

        let summary = game.play_next_turn(1).unwrap(); // p1

        assert_eq!(summary.passes, 2);
        assert_eq!(summary.cleared, 13);
        assert_eq!(
            board(&game),
            pattern(&[
                "       ",
                "       ",
                "       ",
                "       ",
                "      2",
                "      2",
            ])
        );
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(is_next(&game, &p2));
        assert_eq!(p1.borrow().score(), 2);
        assert_eq!(p2.borrow().score(), 1);
    }

    #[test]
    fn test_full_grid_win_goes_to_higher_score() {
        let (mut game, p1, p2) = new_game(4, 4);
        p1.borrow_mut().increase_score();
        p2.borrow_mut().increase_score();
        p2.borrow_mut().increase_score();

        for _ in 0..2 {
            play(&mut game, &[0, 2, 1, 3, 2, 0, 3, 1]);
        }

        assert_eq!(board(&game), pattern(&["2211", "1122", "2211", "1122"]));
        assert_eq!(game.status(), GameStatus::Complete);
        assert_eq!(game.play_next_turn(0), Err(MoveError::NotInProgress));
        assert!(Rc::ptr_eq(&game.winner().unwrap(), &p2));
        assert!(game.next_player().is_none());
        assert_eq!(p2.borrow().score(), 2);
        assert_eq!(p2.borrow().wins(), 1);
        assert_eq!(p1.borrow().score(), 1);
        assert_eq!(p1.borrow().wins(), 0);
    }

    #[test]
    fn test_stalemate() {
        let (mut game, p1, p2) = new_game(4, 4);
        for _ in 0..2 {
            play(&mut game, &[0, 2, 1, 3, 2, 0, 3, 1]);
        }

        assert_eq!(game.status(), GameStatus::Complete);
        assert_eq!(game.play_next_turn(0), Err(MoveError::NotInProgress));
        assert!(game.winner().is_none());
        assert!(game.next_player().is_none());
        assert_eq!(p1.borrow().score(), 0);
        assert_eq!(p2.borrow().score(), 0);
        assert_eq!(p1.borrow().wins(), 0);
        assert_eq!(p2.borrow().wins(), 0);
    }

    #[test]
    fn test_equal_points_draw() {
        let (mut game, p1, p2) = new_game(4, 4);
        for _ in 0..4 {
            play(&mut game, &[1, 2]);
        }
        assert_eq!(game.grid().unwrap().disc_count(), 0);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(is_next(&game, &p1));
        assert_eq!(p1.borrow().score(), 1);
        assert_eq!(p2.borrow().score(), 1);

        for _ in 0..2 {
            play(&mut game, &[0, 2, 1, 3, 2, 0, 3, 1]);
        }

        assert_eq!(board(&game), pattern(&["2211", "1122", "2211", "1122"]));
        assert_eq!(game.status(), GameStatus::Complete);
        assert!(game.winner().is_none());
        assert_eq!(p1.borrow().score(), 1);
        assert_eq!(p2.borrow().score(), 1);
        assert_eq!(p1.borrow().wins(), 0);
        assert_eq!(p2.borrow().wins(), 0);
    }

    #[test]
    fn test_medium_grid() {
        let (mut game, p1, p2) = new_game(10, 10);

        // Two towers side by side, a point each
        for _ in 0..4 {
            play(&mut game, &[0, 1]);
        }
        assert_eq!(game.grid().unwrap().disc_count(), 0);
        assert!(is_next(&game, &p1));
        assert_eq!(p1.borrow().score(), 1);
        assert_eq!(p2.borrow().score(), 1);

        for col in 1..=3 {
            play(&mut game, &[col, 9]);
        }
        play(&mut game, &[9]);
        assert_eq!(
            board(&game),
            pattern(&[
                "          ",
                "          ",
                "          ",
                "          ",
                "          ",
                "          ",
                "         1",
                "         2",
                "         2",
                " 111     2",
            ])
        );

        for _ in 0..4 {
            for col in 2..=5 {
                play(&mut game, &[col, col]);
            }
        }
        assert_eq!(
            board(&game),
            pattern(&[
                "          ",
                "  11      ",
                "  2211    ",
                "  1122    ",
                "  2211    ",
                "  1122    ",
                "  2211   1",
                "  1122   2",
                "  2211   2",
                " 11122   2",
            ])
        );

        for col in 6..=7 {
            play(&mut game, &[col, 9]);
        }
        assert_eq!(
            board(&game),
            pattern(&[
                "          ",
                "          ",
                "          ",
                "          ",
                "         1",
                "         1",
                "         1",
                "         2",
                "  11     2",
                "  22     2",
            ])
        );
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(is_next(&game, &p2));
        assert_eq!(p1.borrow().score(), 2);
        assert_eq!(p2.borrow().score(), 3);

        // Lines of seven for both players empty the grid
        play(&mut game, &[1, 9, 5, 1, 6, 6, 7, 7, 4, 5, 9, 4]);
        assert_eq!(game.grid().unwrap().disc_count(), 0);
        assert!(is_next(&game, &p2));
        assert_eq!(p1.borrow().score(), 4);
        assert_eq!(p2.borrow().score(), 5);

        for _ in 0..5 {
            play(&mut game, &[1, 1]);
        }
        assert_eq!(game.play_next_turn(1), Err(MoveError::ColumnFull(1)));
        assert_eq!(game.play_next_turn(1), Err(MoveError::ColumnFull(1)));

        play(&mut game, &[9]);
        for col in (0..=8).step_by(2) {
            for _ in 0..5 {
                play(&mut game, &[col, col]);
            }
        }
        play(&mut game, &[9]);
        for col in (3..=7).step_by(2) {
            for _ in 0..5 {
                play(&mut game, &[col, col]);
            }
        }

        assert_eq!(
            board(&game),
            pattern(&[
                "        2 ",
                "       11 ",
                "    21222 ",
                "    12111 ",
                "    21222 ",
                "    12211 ",
                "    22122 ",
                "11  11211 ",
                "2122211221",
                "1211121112",
            ])
        );
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(game.winner().is_none());
        assert!(is_next(&game, &p2));
        assert_eq!(p1.borrow().score(), 8);
        assert_eq!(p2.borrow().score(), 10);
        assert_eq!(p1.borrow().wins(), 0);
        assert_eq!(p2.borrow().wins(), 0);
    }

    #[test]
    fn test_large_grid() {
        let (mut game, p1, p2) = new_game(1000, 1000);
        for _ in 0..4 {
            play(&mut game, &[768, 244]);
        }

        assert_eq!(game.grid().unwrap().disc_count(), 0);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(is_next(&game, &p1));
        assert_eq!(p1.borrow().score(), 1);
        assert_eq!(p2.borrow().score(), 1);
    }

    #[test]
    fn test_players_swapped_mid_game() {
        let (mut game, p1, p2) = new_game(4, 64);
        let p1_new = Player::shared("Bob");
        let p2_new = Player::shared("Cynthia");

        for _ in 0..4 {
            play(&mut game, &[35, 20]);
        }
        assert_eq!(game.grid().unwrap().disc_count(), 0);

        game.set_player_one(Rc::clone(&p1_new)).unwrap();
        game.set_player_two(Rc::clone(&p2_new)).unwrap();

        for _ in 0..4 {
            play(&mut game, &[17, 59]);
        }

        assert_eq!(game.grid().unwrap().disc_count(), 0);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(is_next(&game, &p1_new));
        for player in [&p1, &p2, &p1_new, &p2_new] {
            assert_eq!(player.borrow().score(), 1);
            assert_eq!(player.borrow().wins(), 0);
        }
    }

    /// Gravity holds and no connection survives a move, on any sequence.
    #[test]
    fn test_cascades_always_settle() {
        let (mut game, _, _) = new_game(6, 7);
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let mut moves = 0;

        while game.status() == GameStatus::InProgress && moves < 2_000 {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let col = (state >> 33) as usize % 7;
            if game.play_next_turn(col).is_err() {
                continue;
            }
            moves += 1;

            let grid = game.grid().unwrap();
            for c in 0..grid.column_count() {
                let mut seen_disc = false;
                for r in 0..grid.row_count() {
                    let cell = grid.cell_at(r, c);
                    if cell != Cell::Empty {
                        seen_disc = true;
                    } else {
                        assert!(!seen_disc, "gap under a disc in column {c}");
                    }
                    assert!(!grid.connects(r, c), "connection left at ({r}, {c})");
                }
            }
            assert!(grid.disc_count() <= game.turn());
        }
    }

    #[test]
    fn test_restart_clears_scores() {
        let (mut game, p1, p2) = new_game(4, 4);
        for _ in 0..4 {
            play(&mut game, &[1, 2]);
        }
        play(&mut game, &[0]);

        game.restart();

        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.turn(), 0);
        assert_eq!(game.grid().unwrap().disc_count(), 0);
        assert!(is_next(&game, &p1));
        assert_eq!(p1.borrow().score(), 0);
        assert_eq!(p2.borrow().score(), 0);
    }
}
