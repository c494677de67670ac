//! Error types for airspace construction.

use std::fmt;

/// Errors arising from airspace construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpaceError {
    /// Attempted to construct a grid with zero rows or zero columns.
    EmptySpace,
    /// A grid dimension does not fit the `i32` coordinate range.
    DimensionTooLarge {
        /// Which dimension (`"rows"` or `"cols"`).
        name: &'static str,
        /// The requested size.
        value: u32,
        /// The largest accepted size.
        max: u32,
    },
    /// `rows * cols` does not fit in `usize`.
    CellCountOverflow {
        /// Requested rows.
        rows: u32,
        /// Requested columns.
        cols: u32,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpace => write!(f, "grid must have at least one cell"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum {max}")
            }
            Self::CellCountOverflow { rows, cols } => {
                write!(f, "grid {rows}x{cols} has too many cells")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
