//! Spreadsheet document state and logic (UI-agnostic).

mod command;
mod io;
mod ops;
mod state;

pub use command::{ChangeBackground, ChangeText, Command};
pub use state::{CellChanged, CellProperty, DEFAULT_COLUMNS, DEFAULT_ROWS, Spreadsheet};
