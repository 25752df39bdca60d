// src/theme.rs
// Cell colors for the bingo grid. The theme is owned by the session and handed
// to the renderer; nothing here is global.

use serde::Serialize;

use crate::board::BoardCell;
use crate::defs::{DARKEN_FACTOR, DEFAULT_COLOR, OFF_COLOR, OFF_HOVER_COLOR};
use crate::error::BingoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#RRGGBB` (either case). Anything else is rejected.
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#')?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        Some(Rgb {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        })
    }

    // Scale every channel, truncating toward zero
    pub fn darken(self, factor: f64) -> Self {
        let scale = |channel: u8| (f64::from(channel) * factor) as u8;
        Rgb {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub color: String,
    pub on: Rgb,
    pub on_hover: Rgb,
    pub off: Rgb,
    pub off_hover: Rgb,
}

impl Theme {
    pub fn from_hex(color: &str) -> Result<Self, BingoError> {
        let on = Rgb::parse_hex(color).ok_or_else(|| BingoError::InvalidColor(color.to_string()))?;
        Ok(Theme {
            color: color.to_string(),
            on,
            on_hover: on.darken(DARKEN_FACTOR),
            off: fixed(OFF_COLOR),
            off_hover: fixed(OFF_HOVER_COLOR),
        })
    }

    pub fn cell_color(&self, cell: &BoardCell) -> Rgb {
        match (cell.marked, cell.hovered) {
            (true, false) => self.on,
            (true, true) => self.on_hover,
            (false, false) => self.off,
            (false, true) => self.off_hover,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            color: DEFAULT_COLOR.to_string(),
            on: fixed(DEFAULT_COLOR),
            on_hover: fixed(DEFAULT_COLOR).darken(DARKEN_FACTOR),
            off: fixed(OFF_COLOR),
            off_hover: fixed(OFF_HOVER_COLOR),
        }
    }
}

// Built-in colors are known to be well formed
fn fixed(color: &str) -> Rgb {
    Rgb::parse_hex(color).unwrap_or(Rgb { r: 0, g: 0, b: 0 })
}
