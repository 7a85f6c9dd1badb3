/// Number of same-colored discs in a line needed to win or to clear.
pub const CONNECT: usize = 4;

/// The four line orientations a connection can run along.
///
/// Each orientation is a direction vector `(row step, column step)`; a line
/// through a cell is walked in both the forward and the reverse direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Bottom-left to top-right (`/`)
    DiagonalUp,
    /// Top-left to bottom-right (`\`)
    DiagonalDown,
    Vertical,
    Horizontal,
}

impl Orientation {
    /// All orientations, in the order they are checked.
    pub const ALL: [Orientation; 4] = [
        Orientation::DiagonalUp,
        Orientation::DiagonalDown,
        Orientation::Vertical,
        Orientation::Horizontal,
    ];

    /// Forward step as `(row delta, column delta)`. Row 0 is the top.
    pub fn step(self) -> (isize, isize) {
        match self {
            Orientation::DiagonalUp => (-1, 1),
            Orientation::DiagonalDown => (1, 1),
            Orientation::Vertical => (1, 0),
            Orientation::Horizontal => (0, 1),
        }
    }

    /// Reverse step, walking the same line the other way.
    pub fn back(self) -> (isize, isize) {
        let (dr, dc) = self.step();
        (-dr, -dc)
    }
}
