//! cellgrid-core - UI-agnostic spreadsheet document + storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::{CellChanged, CellProperty, ChangeBackground, ChangeText, Command, Spreadsheet};
pub use error::{CoreError, Result};

pub use cellgrid_engine::engine::{Cell, CellRef, Color};
