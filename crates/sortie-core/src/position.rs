//! Grid positions and cardinal directions.

use std::fmt;

/// Cardinal direction for a single grid step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// One row up (row - 1).
    North,
    /// One row down (row + 1).
    South,
    /// One column right (col + 1).
    East,
    /// One column left (col - 1).
    West,
}

impl Direction {
    /// Probe order used wherever all four neighbours are considered:
    /// down, up, right, left. Ties between equally good neighbours are
    /// broken by this order.
    pub const PROBE_ORDER: [Direction; 4] = [
        Direction::South,
        Direction::North,
        Direction::East,
        Direction::West,
    ];

    /// Returns the `(row_offset, col_offset)` for this direction.
    pub fn offset_2d(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    /// The direction pointing the other way.
    pub fn reverse(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// A cell on the mission grid, addressed as `(row, col)`.
///
/// Positions are plain values: they may lie outside any grid (negative
/// or past the last row/column) and it is the airspace's job to
/// classify them. Ordering is row-major.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Row index, growing downwards.
    pub row: i32,
    /// Column index, growing rightwards.
    pub col: i32,
}

impl Position {
    /// Create a position from a row and column.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The position displaced by `(dr, dc)`, saturating at the `i32`
    /// range.
    pub fn offset(self, dr: i32, dc: i32) -> Self {
        Self::new(self.row.saturating_add(dr), self.col.saturating_add(dc))
    }

    /// The adjacent position one step in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dr, dc) = dir.offset_2d();
        self.offset(dr, dc)
    }

    /// Manhattan (L1) distance to `other`, saturating at `u32::MAX`.
    pub fn manhattan(self, other: Position) -> u32 {
        self.row
            .abs_diff(other.row)
            .saturating_add(self.col.abs_diff(other.col))
    }

    /// Per-axis sign of the displacement towards `target`, each in `{-1, 0, 1}`.
    pub fn heading_to(self, target: Position) -> (i32, i32) {
        (
            target.row.cmp(&self.row) as i32,
            target.col.cmp(&self.col) as i32,
        )
    }

    /// One unit step towards `target`, closing the row gap before the
    /// column gap. Returns `self` when already at `target`.
    pub fn step_toward(self, target: Position) -> Self {
        let (dr, dc) = self.heading_to(target);
        if dr != 0 {
            self.offset(dr, 0)
        } else {
            self.offset(0, dc)
        }
    }

    /// The four axis-aligned neighbours in [`Direction::PROBE_ORDER`].
    ///
    /// No bounds are applied; callers filter through the airspace.
    pub fn neighbours(self) -> [Position; 4] {
        Direction::PROBE_ORDER.map(|dir| self.step(dir))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}
