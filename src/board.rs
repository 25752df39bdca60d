// src/board.rs
// This module handles the bingo board: filling it from the pouch and tracking
// which cells have been marked.

use rand::Rng;
use serde::Serialize;

use crate::defs::{BOARD_SIZE, FREE_LABEL, labels_needed};
use crate::error::BingoError;
use crate::pouch::EntryPool;
use crate::score::{self, Line};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoardCell {
    pub x: usize,
    pub y: usize,
    pub marked: bool,
    // Presentation only, ignored by win detection
    pub hovered: bool,
}

// This struct represents one filled bingo card. Cells and labels are stored
// row-major, index = y * size + x.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    size: usize,
    cells: Vec<BoardCell>,
    labels: Vec<String>,
}

impl Board {
    /// Fill a standard size board from `pool`.
    pub fn fill<R: Rng + ?Sized>(pool: EntryPool, rng: &mut R) -> Result<Self, BingoError> {
        Self::fill_sized(BOARD_SIZE, pool, rng)
    }

    /// Fill a `size` x `size` board.
    ///
    /// Labels are drawn from the pool first, then placed by picking a random
    /// pending label for each cell, column by column. The center cell always
    /// gets the FREE label. Every cell starts unmarked and not hovered.
    pub fn fill_sized<R: Rng + ?Sized>(
        size: usize,
        mut pool: EntryPool,
        rng: &mut R,
    ) -> Result<Self, BingoError> {
        let mut pending = Vec::with_capacity(labels_needed(size));
        for _ in 0..labels_needed(size) {
            pending.push(pool.draw_one(rng)?);
        }

        let mut board = Board {
            size,
            cells: Vec::with_capacity(size * size),
            labels: vec![String::new(); size * size],
        };
        for y in 0..size {
            for x in 0..size {
                board.cells.push(BoardCell { x, y, ..BoardCell::default() });
            }
        }

        let center = board.center();
        for x in 0..size {
            for y in 0..size {
                let label = if (x, y) == center {
                    FREE_LABEL.to_string()
                } else {
                    pending.remove(rng.random_range(0..pending.len()))
                };
                board.labels[y * size + x] = label;
            }
        }

        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn center(&self) -> (usize, usize) {
        (self.size / 2, self.size / 2)
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, BingoError> {
        if x >= self.size || y >= self.size {
            return Err(BingoError::OutOfBounds { x, y, size: self.size });
        }
        Ok(y * self.size + x)
    }

    pub fn cell(&self, x: usize, y: usize) -> Result<&BoardCell, BingoError> {
        let index = self.index(x, y)?;
        Ok(&self.cells[index])
    }

    pub fn label(&self, x: usize, y: usize) -> Result<&str, BingoError> {
        let index = self.index(x, y)?;
        Ok(&self.labels[index])
    }

    // Unchecked accessor for the win scan, coordinates come from the board itself
    pub(crate) fn is_marked(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.size + x].marked
    }

    /// Flip the mark on a cell and return the new state.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<bool, BingoError> {
        let index = self.index(x, y)?;
        let cell = &mut self.cells[index];
        cell.marked = !cell.marked;
        Ok(cell.marked)
    }

    pub fn set_hover(&mut self, x: usize, y: usize, hovered: bool) -> Result<(), BingoError> {
        let index = self.index(x, y)?;
        self.cells[index].hovered = hovered;
        Ok(())
    }

    pub fn check_win(&self) -> bool {
        score::check_win(self)
    }

    pub fn winning_line(&self) -> Option<Line> {
        score::winning_line(self)
    }

    pub fn cells(&self) -> impl Iterator<Item = &BoardCell> {
        self.cells.iter()
    }

    pub fn marked_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.marked).count()
    }

    /// Labels grouped by row, top to bottom.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.labels
            .chunks(self.size.max(1))
            .map(<[String]>::to_vec)
            .collect()
    }
}
