use super::{CellProperty, Spreadsheet};
use crate::error::{CoreError, Result};
use crate::storage::{CellRecord, parse_xml, write_xml};
use cellgrid_engine::engine::{Cell, CellError, CellRef, Color};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

impl Spreadsheet {
    /// Records for every cell with text or a non-default background.
    ///
    /// Cells showing a circular reference come last. Loading replays the
    /// records in order, so every other edge exists again by the time those
    /// formulas are evaluated and the same edge is rejected.
    pub fn records(&self) -> Vec<CellRecord> {
        let circular = CellError::Circular.to_string();
        let (closing, rest): (Vec<&Cell>, Vec<&Cell>) = self
            .cells
            .iter()
            .filter(|cell| !cell.is_default())
            .partition(|cell| cell.value() == circular);

        rest.into_iter().chain(closing).map(CellRecord::from_cell).collect()
    }

    /// Write the sheet as XML.
    pub fn save<W: Write>(&self, out: W) -> Result<()> {
        write_xml(out, &self.records())
    }

    /// Replace the sheet's contents with an XML document.
    ///
    /// The document is parsed before anything changes, so on error the sheet
    /// is left as it was. Otherwise every cell is reset, undo/redo history is
    /// cleared and the records are applied in document order.
    pub fn load<R: BufRead>(&mut self, source: R) -> Result<()> {
        let records = parse_xml(source)?;

        let mut resolved = Vec::with_capacity(records.len());
        for record in records {
            match CellRef::from_str(&record.name).and_then(|cell| self.index(cell)) {
                Some(idx) => resolved.push((idx, record)),
                None => log::warn!("skipping cell '{}': not in a {}x{} grid", record.name, self.rows, self.columns),
            }
        }

        self.reset();
        for (idx, record) in resolved {
            self.apply_background(idx, record.background);
            self.apply_text(idx, &record.text);
        }

        self.modified = false;
        Ok(())
    }

    /// Save to the current file path.
    /// Returns the path saved to.
    pub fn save_file(&mut self) -> Result<PathBuf> {
        let Some(path) = self.file_path.clone() else {
            return Err(CoreError::NoFilePath);
        };
        self.save_file_as(&path)?;
        Ok(path)
    }

    /// Save to `path` and make it the current file path.
    pub fn save_file_as(&mut self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.save(BufWriter::new(file))?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Load from file
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path)?;
        self.load(BufReader::new(file))?;
        self.file_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Return every cell to empty text and the default color, dropping all
    /// dependencies and history.
    fn reset(&mut self) {
        self.clear_history();
        self.graph.clear();
        for idx in 0..self.cells.len() {
            let cell = self.cells[idx].cell_ref();
            if self.cells[idx].set_text("") {
                self.notify(cell, CellProperty::Text);
            }
            if self.cells[idx].set_value(String::new()) {
                self.notify(cell, CellProperty::Value);
            }
            if self.cells[idx].set_background(Color::DEFAULT) {
                self.notify(cell, CellProperty::Background);
            }
        }
    }
}
