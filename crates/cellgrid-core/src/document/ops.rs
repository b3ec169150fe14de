use super::{CellChanged, CellProperty, Command, Spreadsheet};
use crate::error::Result;
use std::collections::BTreeSet;
use cellgrid_engine::engine::{
    Cell, CellError, CellRef, Color, ExpressionTree, Operator, dependency_path, format_number,
    parse_operand,
};

impl Spreadsheet {
    /// Get the cell at a 0-based position.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cell_at(CellRef::new(row, col))
    }

    pub fn cell_at(&self, cell: CellRef) -> Option<&Cell> {
        self.index(cell).map(|idx| &self.cells[idx])
    }

    /// Look a cell up by name, e.g. `B3`.
    pub fn cell_by_name(&self, name: &str) -> Option<&Cell> {
        CellRef::from_str(name).and_then(|cell| self.cell_at(cell))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Set a cell's text and recompute it and everything that reads it.
    /// Setting the current text again does nothing.
    pub fn set_text(&mut self, cell: CellRef, text: &str) -> Result<()> {
        let idx = self.checked_index(cell)?;
        self.apply_text(idx, text);
        Ok(())
    }

    pub fn set_background(&mut self, cell: CellRef, color: Color) -> Result<()> {
        let idx = self.checked_index(cell)?;
        self.apply_background(idx, color);
        Ok(())
    }

    /// Register a callback that receives every cell change.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&CellChanged) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Make `op` available to formulas and re-evaluate every formula cell.
    /// Returns false if the symbol is reserved.
    pub fn register_operator(&mut self, op: Operator) -> bool {
        if !self.registry.register(op) {
            return false;
        }
        self.recalculate_formulas();
        true
    }

    /// Record a command that has already been applied. Clears the redo stack.
    pub fn add_undo(&mut self, command: Command) {
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Apply a command and record it for undo.
    pub fn execute(&mut self, mut command: Command) {
        command.execute(self);
        self.add_undo(command);
    }

    /// Undo the last command. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(command) = self.undo_stack.pop() else {
            return false;
        };
        command.undo(self);
        self.redo_stack.push(command);
        true
    }

    /// Redo the last undone command. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(mut command) = self.redo_stack.pop() else {
            return false;
        };
        command.execute(self);
        self.undo_stack.push(command);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Title of the command `undo` would revert.
    pub fn undo_title(&self) -> Option<&'static str> {
        self.undo_stack.last().map(Command::title)
    }

    /// Title of the command `redo` would reapply.
    pub fn redo_title(&self) -> Option<&'static str> {
        self.redo_stack.last().map(Command::title)
    }

    pub(crate) fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub(crate) fn notify(&mut self, cell: CellRef, property: CellProperty) {
        let event = CellChanged { cell, property };
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    /// Returns true if the text changed.
    pub(crate) fn apply_text(&mut self, idx: usize, text: &str) -> bool {
        if !self.cells[idx].set_text(text) {
            return false;
        }
        self.modified = true;
        self.notify(self.cells[idx].cell_ref(), CellProperty::Text);
        self.recalculate(idx);
        true
    }

    /// Returns true if the color changed.
    pub(crate) fn apply_background(&mut self, idx: usize, color: Color) -> bool {
        if !self.cells[idx].set_background(color) {
            return false;
        }
        self.modified = true;
        self.notify(self.cells[idx].cell_ref(), CellProperty::Background);
        true
    }

    pub(crate) fn recalculate_formulas(&mut self) {
        for idx in 0..self.cells.len() {
            if self.cells[idx].is_formula() {
                self.recalculate(idx);
            }
        }
    }

    /// Recompute a cell's value from its text. If the value changed, every
    /// cell that reads it is brought up to date in one pass, each at most once
    /// and only after all of its inputs.
    fn recalculate(&mut self, idx: usize) {
        if !self.refresh(idx) {
            return;
        }

        let mut stale: BTreeSet<usize> = self.graph.dependents_of(idx).collect();
        for cell in self.graph.recalc_order(idx) {
            if stale.remove(&cell) && self.refresh(cell) {
                stale.extend(self.graph.dependents_of(cell));
            }
        }
    }

    /// Re-evaluate a single cell. Returns true if its value changed.
    fn refresh(&mut self, idx: usize) -> bool {
        self.graph.clear_dependencies(idx);

        let text = self.cells[idx].text().to_string();
        let value = match text.strip_prefix('=') {
            Some(body) => match self.evaluate_formula(idx, body) {
                Ok(n) => format_number(n),
                Err(err) => {
                    log::debug!("{}: {:?} in '{}'", self.cells[idx].name(), err, text);
                    err.to_string()
                }
            },
            None => text,
        };

        if !self.cells[idx].set_value(value) {
            return false;
        }
        let cell = self.cells[idx].cell_ref();
        log::trace!("{} = {}", cell, self.cells[idx].value());
        self.notify(cell, CellProperty::Value);
        true
    }

    /// Parse a formula body, wire up its dependencies and evaluate it.
    ///
    /// Edges added before a bad or circular reference are kept so the cell
    /// still updates when those inputs change.
    fn evaluate_formula(&mut self, idx: usize, body: &str) -> std::result::Result<f64, CellError> {
        let mut tree = ExpressionTree::with_registry(body, &self.registry)?;
        let names = tree.variables().to_vec();

        for name in &names {
            let other = CellRef::from_str(name)
                .and_then(|cell| self.index(cell))
                .ok_or(CellError::Reference)?;

            if let Err(err) = self.graph.add_dependency(idx, other) {
                if let Some(path) = dependency_path(&self.graph, other, idx) {
                    let path: Vec<String> = path.iter().map(|&i| self.cells[i].name()).collect();
                    log::debug!("cycle: {} -> {}", self.cells[idx].name(), path.join(" -> "));
                }
                return Err(err);
            }
            tree.set_variable(name, parse_operand(self.cells[other].value()));
        }

        Ok(tree.evaluate())
    }
}
