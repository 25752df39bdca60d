// src/error.rs
// Error type shared by the bingo card library.

use derive_more::{Display, Error};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BingoError {
    /// Not enough entries across all lists to fill a board.
    #[display("Not enough entries. Requires {required}, input {available}.")]
    InvalidInput { required: usize, available: usize },
    /// The resolved list had nothing left to draw.
    #[display("No entries left to draw from list {list}")]
    ExhaustedPool { list: usize },
    /// Cell coordinates outside the grid.
    #[display("Cell ({x}, {y}) is outside the {size}x{size} board")]
    OutOfBounds { x: usize, y: usize, size: usize },
    #[display("File {} not found", _0.display())]
    FileNotFound(#[error(not(source))] PathBuf),
    #[display("Could not read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
    #[display("{_0}")]
    Usage(#[error(not(source))] String),
    #[display("Invalid color '{_0}', expected #RRGGBB")]
    InvalidColor(#[error(not(source))] String),
}
