//! Error types for cellgrid core.

use thiserror::Error;

use cellgrid_engine::engine::{CellRef, MAX_COLUMNS};

/// Errors that can occur while editing, saving or loading a spreadsheet
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid grid size {rows}x{columns}: need at least one row and 1..={max} columns", max = MAX_COLUMNS)]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("Cell {0} is outside the grid")]
    OutOfBounds(CellRef),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("Malformed spreadsheet file: {0}")]
    Malformed(String),

    #[error("Invalid background color '{0}': expected 8 hex digits (AARRGGBB)")]
    InvalidColor(String),

    #[error("No file path set")]
    NoFilePath,
}

pub type Result<T> = std::result::Result<T, CoreError>;
