//! Error types.
//!
//! [`ConfigError`] covers malformed board input and is raised before any
//! exploration starts. [`MoveError`] explains why a single placement was
//! rejected; move generation drops such moves instead of surfacing them.

use thiserror::Error;

/// A board could not be constructed from its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No rows, or rows with no cells.
    #[error("board is empty")]
    Empty,
    /// A row has a different length from the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The board must be square but is not.
    #[error("board is {rows}x{cols}, but a square board is required")]
    NotSquare { rows: usize, cols: usize },
    /// A cell token is not an integer.
    #[error("cell ({row}, {col}) is not an integer: {token:?}")]
    InvalidCell {
        row: usize,
        col: usize,
        token: String,
    },
    /// A cell is an integer outside the known codes.
    #[error("cell ({row}, {col}) has unknown code {value}; expected -2..=2")]
    CellOutOfRange { row: usize, col: usize, value: i64 },
}

/// Why a placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Point lies outside the board.
    #[error("illegal move: point off the board")]
    OffBoard,
    /// Point holds a stone.
    #[error("illegal move: point not empty")]
    Occupied,
    /// Point is reserved for the other player.
    #[error("illegal move: point reserved for the opponent")]
    Reserved,
    /// Move would leave the placed group without liberties and captures nothing.
    #[error("illegal move: suicide")]
    Suicide,
    /// Move recreates the board of the position or one of its ancestors.
    #[error("illegal move: repeats an earlier board")]
    Repetition,
}
