// src/session.rs
// This module provides the BingoSession struct that ties the loaded word lists,
// the active board and the theme together for a front end to drive.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::board::Board;
use crate::defs::{BOARD_SIZE, MAX_COLOR_LENGTH, MAX_SEED_LENGTH, labels_needed};
use crate::error::BingoError;
use crate::logging::{log_info, log_warning};
use crate::pouch::{EntryPool, SourceList, total_entries};
use crate::score::Line;
use crate::text_field::TextField;
use crate::theme::Theme;

// Seeds are 32-bit like the seed field; negative values sign-extend
pub fn seeded_rng(seed: i32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(i64::from(seed) as u64)
}

pub fn random_seed() -> i32 {
    rand::random::<i32>()
}

/// Board contents as written by `--json`.
#[derive(Debug, Serialize)]
pub struct CardExport {
    pub seed: i32,
    pub size: usize,
    pub rows: Vec<Vec<String>>,
}

pub struct BingoSession {
    lists: Vec<SourceList>,
    board: Board,
    theme: Theme,
    seed: i32,
    pub seed_field: TextField,
    pub color_field: TextField,
}

impl BingoSession {
    /// Start a session and fill the first board. Uses a random seed when none is given.
    pub fn new(lists: Vec<SourceList>, theme: Theme, seed: Option<i32>) -> Result<Self, BingoError> {
        let required = labels_needed(BOARD_SIZE);
        let available = total_entries(&lists);
        if available < required {
            return Err(BingoError::InvalidInput { required, available });
        }

        let seed = seed.unwrap_or_else(random_seed);
        let board = Self::fill_board(&lists, seed)?;

        Ok(BingoSession {
            seed_field: TextField::with_text(&seed.to_string(), MAX_SEED_LENGTH),
            color_field: TextField::with_text(&theme.color, MAX_COLOR_LENGTH),
            lists,
            board,
            theme,
            seed,
        })
    }

    // Fresh pool from the untouched lists every time
    fn fill_board(lists: &[SourceList], seed: i32) -> Result<Board, BingoError> {
        let pool = EntryPool::new(lists)?;
        let board = Board::fill(pool, &mut seeded_rng(seed))?;
        log_info(&format!("Board filled with seed {seed}"));
        Ok(board)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn lists(&self) -> &[SourceList] {
        &self.lists
    }

    /// Replace the board with one generated from `seed`. Marks are discarded.
    pub fn regenerate_with_seed(&mut self, seed: i32) -> Result<(), BingoError> {
        self.board = Self::fill_board(&self.lists, seed)?;
        self.seed = seed;
        Ok(())
    }

    /// Regenerate from seed text. Text that is not an integer leaves the current
    /// board in place and returns `Ok(false)`.
    pub fn regenerate(&mut self, seed_text: &str) -> Result<bool, BingoError> {
        match seed_text.parse::<i32>() {
            Ok(seed) => {
                self.regenerate_with_seed(seed)?;
                Ok(true)
            }
            Err(_) => {
                log_warning(&format!("Ignoring seed '{seed_text}', keeping current board"));
                Ok(false)
            }
        }
    }

    pub fn submit_seed_field(&mut self) -> Result<bool, BingoError> {
        let text = self.seed_field.text();
        self.regenerate(&text)
    }

    /// Switch the marked-cell color. Invalid colors are ignored.
    pub fn apply_color(&mut self, color: &str) -> bool {
        match Theme::from_hex(color) {
            Ok(theme) => {
                self.theme = theme;
                true
            }
            Err(e) => {
                log_warning(&e.to_string());
                false
            }
        }
    }

    pub fn submit_color_field(&mut self) -> bool {
        let text = self.color_field.text();
        self.apply_color(&text)
    }

    pub fn toggle(&mut self, x: usize, y: usize) -> Result<bool, BingoError> {
        self.board.toggle(x, y)
    }

    pub fn set_hover(&mut self, x: usize, y: usize, hovered: bool) -> Result<(), BingoError> {
        self.board.set_hover(x, y, hovered)
    }

    pub fn has_won(&self) -> bool {
        self.board.check_win()
    }

    pub fn winning_line(&self) -> Option<Line> {
        self.board.winning_line()
    }

    pub fn export(&self) -> CardExport {
        CardExport {
            seed: self.seed,
            size: self.board.size(),
            rows: self.board.rows(),
        }
    }
}
