use std::fmt;

use super::lines::{Orientation, CONNECT};
use crate::error::MoveError;

/// Smallest allowed number of rows or columns.
pub const MIN_DIMENSION: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::PlayerOne => '1',
            Cell::PlayerTwo => '2',
        }
    }
}

/// A vertically suspended grid of cells.
///
/// Row 0 is the top, where discs are inserted; row `rows - 1` is the bottom,
/// where they come to rest. Column 0 is the leftmost column. Outside of a
/// cascade, every column holds its discs as one contiguous stack resting on
/// the bottom row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid. Any dimension below [`MIN_DIMENSION`] is raised
    /// to exactly [`MIN_DIMENSION`].
    pub fn new(rows: usize, columns: usize) -> Self {
        let rows = rows.max(MIN_DIMENSION);
        let columns = columns.max(MIN_DIMENSION);
        Grid {
            rows,
            columns,
            cells: vec![Cell::Empty; rows * columns],
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.rows && column < self.columns).then(|| row * self.columns + column)
    }

    /// Get the cell at a position. Any out-of-range position reads as empty.
    pub fn cell_at(&self, row: usize, column: usize) -> Cell {
        self.index(row, column)
            .map_or(Cell::Empty, |i| self.cells[i])
    }

    /// Signed probe used by line walks that step past the edges.
    fn probe(&self, row: isize, column: isize) -> Cell {
        match (usize::try_from(row), usize::try_from(column)) {
            (Ok(r), Ok(c)) => self.cell_at(r, c),
            _ => Cell::Empty,
        }
    }

    /// Check if a column can take no more discs. Out-of-range columns count
    /// as full.
    pub fn is_column_full(&self, column: usize) -> bool {
        if column >= self.columns {
            return true;
        }
        !self.cell_at(0, column).is_empty()
    }

    /// Drop a disc into a column, returning the row where it landed.
    pub fn insert_disc(&mut self, column: usize, disc: Cell) -> Result<usize, MoveError> {
        if disc.is_empty() {
            return Err(MoveError::EmptyDisc);
        }
        if column >= self.columns {
            return Err(MoveError::InvalidColumn {
                column,
                columns: self.columns,
            });
        }
        if self.is_column_full(column) {
            return Err(MoveError::ColumnFull(column));
        }

        // Lowest empty row; the column is a bottom-anchored stack
        let row = (0..self.rows)
            .rev()
            .find(|&row| self.cell_at(row, column).is_empty())
            .ok_or(MoveError::ColumnFull(column))?;
        self.cells[row * self.columns + column] = disc;
        Ok(row)
    }

    /// Set every cell to empty. Dimensions are unchanged.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Force a single cell to empty. Used by combo clearing; the column may
    /// hold a gap until [`Grid::fall_down`] runs.
    pub fn make_empty_cell(&mut self, column: usize, row: usize) {
        if let Some(i) = self.index(row, column) {
            self.cells[i] = Cell::Empty;
        }
    }

    /// Let every disc fall as far as it can. Each column is compacted onto
    /// the bottom row independently, keeping the discs' top-to-bottom order.
    pub fn fall_down(&mut self) {
        for column in 0..self.columns {
            let mut write = self.rows;
            for read in (0..self.rows).rev() {
                let cell = self.cell_at(read, column);
                if cell.is_empty() {
                    continue;
                }
                write -= 1;
                if write != read {
                    self.cells[write * self.columns + column] = cell;
                    self.cells[read * self.columns + column] = Cell::Empty;
                }
            }
        }
    }

    /// True when no column can accept another disc.
    pub fn no_more_moves(&self) -> bool {
        (0..self.columns).all(|column| self.is_column_full(column))
    }

    /// Walk the line through `(row, column)` in both directions of an
    /// orientation, collecting consecutive cells holding `disc`.
    ///
    /// The starting position is always the first entry, whatever it holds.
    pub fn line_through(
        &self,
        row: usize,
        column: usize,
        disc: Cell,
        orientation: Orientation,
    ) -> Vec<(usize, usize)> {
        let mut run = vec![(row, column)];
        if disc.is_empty() {
            return run;
        }

        for (dr, dc) in [orientation.step(), orientation.back()] {
            let mut r = row as isize + dr;
            let mut c = column as isize + dc;
            while self.probe(r, c) == disc {
                run.push((r as usize, c as usize));
                r += dr;
                c += dc;
            }
        }
        run
    }

    /// Check if the disc at `(row, column)` is part of a connection of four
    /// or more in any orientation.
    pub fn connects(&self, row: usize, column: usize) -> bool {
        let disc = self.cell_at(row, column);
        if disc.is_empty() {
            return false;
        }
        Orientation::ALL
            .iter()
            .any(|&o| self.line_through(row, column, disc, o).len() >= CONNECT)
    }

    /// Number of non-empty cells.
    pub fn disc_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for column in 0..self.columns {
                write!(f, "{}", self.cell_at(row, column).symbol())?;
            }
        }
        Ok(())
    }
}
