//! Cell data structures for the spreadsheet grid.
//!
//! - [`Color`] - 32-bit ARGB background color
//! - [`Cell`] - Raw text, derived display value and background of one cell
//!
//! Dependencies between cells are not stored here; see
//! [`DependencyGraph`](super::DependencyGraph).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::cell_ref::CellRef;

/// A 32-bit ARGB color.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    /// Opaque white.
    pub const DEFAULT: Color = Color(0xFFFF_FFFF);

    pub fn argb(self) -> u32 {
        self.0
    }

    pub fn is_default(self) -> bool {
        self == Color::DEFAULT
    }

    /// Eight uppercase hex digits, alpha first (`FFFF0000` is opaque red).
    pub fn to_hex(self) -> String {
        format!("{:08X}", self.0)
    }

    /// Parse exactly eight hex digits. Surrounding whitespace is ignored.
    pub fn from_hex(text: &str) -> Option<Color> {
        let text = text.trim();
        if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(text, 16).ok().map(Color)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::DEFAULT
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

impl std::str::FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s).ok_or_else(|| format!("Invalid ARGB color: {}", s))
    }
}

/// A cell in the spreadsheet grid.
///
/// The position is fixed at construction. `value` is derived from `text` by
/// the owning sheet: plain text is copied through, formulas (text starting
/// with `=`) hold their evaluated result or an error sentinel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    row: usize,
    col: usize,
    text: String,
    value: String,
    background: Color,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Cell {
        Cell {
            row,
            col,
            text: String::new(),
            value: String::new(),
            background: Color::DEFAULT,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn cell_ref(&self) -> CellRef {
        CellRef::new(self.row, self.col)
    }

    /// The cell's name, e.g. `B3`.
    pub fn name(&self) -> String {
        self.cell_ref().to_string()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn is_formula(&self) -> bool {
        self.text.starts_with('=')
    }

    /// True when the cell would be omitted from a saved file.
    pub fn is_default(&self) -> bool {
        self.text.is_empty() && self.background.is_default()
    }

    /// Returns true if the text changed.
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.text == text {
            return false;
        }
        self.text = text.to_string();
        true
    }

    /// Returns true if the value changed.
    pub fn set_value(&mut self, value: String) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        true
    }

    /// Returns true if the color changed.
    pub fn set_background(&mut self, color: Color) -> bool {
        if self.background == color {
            return false;
        }
        self.background = color;
        true
    }
}
