// src/defs.rs
// Shared constants for the bingo card.

// Side of the square board. The center cell is the FREE cell.
pub const BOARD_SIZE: usize = 5;

// Label of the center cell
pub const FREE_LABEL: &str = "FREE";

// Cap value used on the command line for "no limit"
pub const UNBOUNDED_CAP: i64 = -1;

// Input field limits
pub const MAX_SEED_LENGTH: usize = 10;
pub const MAX_COLOR_LENGTH: usize = 7;

// Colors
pub const DEFAULT_COLOR: &str = "#ffaaaa";
pub const OFF_COLOR: &str = "#eeeeee";
pub const OFF_HOVER_COLOR: &str = "#dddddd";
pub const DARKEN_FACTOR: f64 = 0.9;

// Number of labels drawn for a board of the given size (every cell but the center)
pub const fn labels_needed(size: usize) -> usize {
    (size * size).saturating_sub(1)
}
