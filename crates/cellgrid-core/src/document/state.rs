use crate::error::{CoreError, Result};
use cellgrid_engine::engine::{Cell, CellRef, DependencyGraph, MAX_COLUMNS, OperatorRegistry};
use std::path::PathBuf;

use super::command::Command;

/// Grid height used when no size is configured.
pub const DEFAULT_ROWS: usize = 50;
/// Grid width used when no size is configured.
pub const DEFAULT_COLUMNS: usize = MAX_COLUMNS;

/// Which property of a cell changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellProperty {
    Text,
    Value,
    Background,
}

/// Change notification delivered to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellChanged {
    pub cell: CellRef,
    pub property: CellProperty,
}

pub(crate) type Listener = Box<dyn FnMut(&CellChanged)>;

/// UI-agnostic spreadsheet document.
///
/// Owns a fixed `rows x columns` grid of cells, the dependency graph between
/// formula cells and the undo/redo history. Dimensions never change after
/// construction.
pub struct Spreadsheet {
    pub(crate) rows: usize,
    pub(crate) columns: usize,
    /// Row-major cell arena, indexed `row * columns + col`
    pub(crate) cells: Vec<Cell>,
    pub(crate) graph: DependencyGraph,
    /// Operators formulas may use
    pub(crate) registry: OperatorRegistry,
    pub(crate) listeners: Vec<Listener>,
    /// Undo stack
    pub(crate) undo_stack: Vec<Command>,
    /// Redo stack
    pub(crate) redo_stack: Vec<Command>,
    /// Path used by `save_file`
    pub file_path: Option<PathBuf>,
    /// Whether the sheet has unsaved edits
    pub modified: bool,
}

impl Spreadsheet {
    /// Create an empty sheet.
    ///
    /// Fails if either dimension is zero or there are more columns than
    /// single-letter names.
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        if rows == 0 || columns == 0 || columns > MAX_COLUMNS {
            return Err(CoreError::InvalidDimensions { rows, columns });
        }
        let len = rows
            .checked_mul(columns)
            .ok_or(CoreError::InvalidDimensions { rows, columns })?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| CoreError::InvalidDimensions { rows, columns })?;

        Ok(Self::empty_grid(rows, columns, cells))
    }

    fn empty_grid(rows: usize, columns: usize, mut cells: Vec<Cell>) -> Self {
        let len = rows * columns;
        for row in 0..rows {
            for col in 0..columns {
                cells.push(Cell::new(row, col));
            }
        }

        Spreadsheet {
            rows,
            columns,
            cells,
            graph: DependencyGraph::new(len),
            registry: OperatorRegistry::standard(),
            listeners: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            file_path: None,
            modified: false,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Arena index of `cell`, or None if it lies outside the grid.
    pub(crate) fn index(&self, cell: CellRef) -> Option<usize> {
        (cell.row < self.rows && cell.col < self.columns).then(|| cell.row * self.columns + cell.col)
    }

    pub(crate) fn checked_index(&self, cell: CellRef) -> Result<usize> {
        self.index(cell).ok_or(CoreError::OutOfBounds(cell))
    }
}

impl Default for Spreadsheet {
    fn default() -> Self {
        Self::empty_grid(DEFAULT_ROWS, DEFAULT_COLUMNS, Vec::with_capacity(DEFAULT_ROWS * DEFAULT_COLUMNS))
    }
}

impl std::fmt::Debug for Spreadsheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spreadsheet")
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .field("undo", &self.undo_stack.len())
            .field("redo", &self.redo_stack.len())
            .field("file_path", &self.file_path)
            .field("modified", &self.modified)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_dimensions() {
        assert!(matches!(
            Spreadsheet::new(0, 5),
            Err(CoreError::InvalidDimensions { rows: 0, columns: 5 })
        ));
        assert!(Spreadsheet::new(5, 0).is_err());
        assert!(Spreadsheet::new(5, 27).is_err());
        assert!(Spreadsheet::new(1, 26).is_ok());
    }

    #[test]
    fn test_new_rejects_grid_too_large_to_allocate() {
        let rows = usize::MAX / MAX_COLUMNS;
        assert!(matches!(
            Spreadsheet::new(rows, MAX_COLUMNS),
            Err(CoreError::InvalidDimensions { columns: MAX_COLUMNS, .. })
        ));
        assert!(matches!(
            Spreadsheet::new(usize::MAX, 2),
            Err(CoreError::InvalidDimensions { rows: usize::MAX, columns: 2 })
        ));
    }

    #[test]
    fn test_cells_are_laid_out_row_major() {
        let sheet = Spreadsheet::new(3, 4).unwrap();
        assert_eq!(sheet.cells.len(), 12);
        assert_eq!(sheet.index(CellRef::new(2, 1)), Some(9));
        assert_eq!(sheet.cells[9].name(), "B3");
        assert_eq!(sheet.index(CellRef::new(3, 0)), None);
        assert_eq!(sheet.index(CellRef::new(0, 4)), None);
    }

    #[test]
    fn test_default_is_fifty_by_twenty_six() {
        let sheet = Spreadsheet::default();
        assert_eq!(sheet.rows(), 50);
        assert_eq!(sheet.columns(), 26);
        assert!(!sheet.modified);
    }
}
