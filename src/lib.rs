// lib.rs
// Library modules for the bingo card generator

pub mod defs;
pub mod error;
pub mod pouch;
pub mod board;
pub mod score;
pub mod theme;
pub mod text_field;
pub mod wordlist;
pub mod session;
pub mod config;
pub mod logging;
pub mod terminal;
