// src/score.rs
// Win detection for the bingo board: a full row, column or diagonal of marked cells.

use serde::Serialize;
use std::fmt;

use crate::board::Board;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Line {
    Column(usize),
    Row(usize),
    Diagonal,
    AntiDiagonal,
}

impl Line {
    /// Coordinates `(x, y)` covered by this line on a `size` x `size` board.
    pub fn cells(self, size: usize) -> Vec<(usize, usize)> {
        match self {
            Line::Column(x) => (0..size).map(|y| (x, y)).collect(),
            Line::Row(y) => (0..size).map(|x| (x, y)).collect(),
            Line::Diagonal => (0..size).map(|d| (d, d)).collect(),
            Line::AntiDiagonal => (0..size).map(|d| (d, size - 1 - d)).collect(),
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Column(x) => write!(f, "column {}", x + 1),
            Line::Row(y) => write!(f, "row {}", y + 1),
            Line::Diagonal => write!(f, "diagonal"),
            Line::AntiDiagonal => write!(f, "anti-diagonal"),
        }
    }
}

// Every line that can win on a board of this size, in scan order
pub fn all_lines(size: usize) -> Vec<Line> {
    let mut lines: Vec<Line> = (0..size).map(Line::Column).collect();
    lines.extend((0..size).map(Line::Row));
    lines.push(Line::Diagonal);
    lines.push(Line::AntiDiagonal);
    lines
}

/// First fully marked line, if any. Only the `marked` flags count.
pub fn winning_line(board: &Board) -> Option<Line> {
    let size = board.size();
    if size == 0 {
        return None;
    }

    all_lines(size).into_iter().find(|line| {
        line.cells(size)
            .into_iter()
            .all(|(x, y)| board.is_marked(x, y))
    })
}

pub fn check_win(board: &Board) -> bool {
    winning_line(board).is_some()
}
