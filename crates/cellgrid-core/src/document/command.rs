//! Reversible edits recorded on the undo/redo stacks.

use crate::error::Result;
use cellgrid_engine::engine::{CellRef, Color};

use super::Spreadsheet;

/// Replace the text of one cell.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeText {
    cell: CellRef,
    old_text: String,
    new_text: String,
}

impl ChangeText {
    pub fn cell(&self) -> CellRef {
        self.cell
    }

    pub fn old_text(&self) -> &str {
        &self.old_text
    }

    pub fn new_text(&self) -> &str {
        &self.new_text
    }
}

/// Set the background of one or more cells to the same color.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeBackground {
    /// Each cell with the color it had when the command was created
    old_colors: Vec<(CellRef, Color)>,
    new_color: Color,
}

impl ChangeBackground {
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        self.old_colors.iter().map(|(cell, _)| *cell)
    }

    pub fn new_color(&self) -> Color {
        self.new_color
    }
}

/// An undoable edit.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    ChangeText(ChangeText),
    ChangeBackground(ChangeBackground),
}

impl Command {
    /// A text edit of `cell`. The current text is captured for undo.
    pub fn change_text(sheet: &Spreadsheet, cell: CellRef, new_text: &str) -> Result<Command> {
        let idx = sheet.checked_index(cell)?;
        Ok(Command::ChangeText(ChangeText {
            cell,
            old_text: sheet.cells[idx].text().to_string(),
            new_text: new_text.to_string(),
        }))
    }

    /// A color edit of `cells`. Their current colors are captured for undo.
    /// Repeated cells are kept once.
    pub fn change_background(
        sheet: &Spreadsheet,
        cells: impl IntoIterator<Item = CellRef>,
        new_color: Color,
    ) -> Result<Command> {
        let mut old_colors: Vec<(CellRef, Color)> = Vec::new();
        for cell in cells {
            let idx = sheet.checked_index(cell)?;
            if old_colors.iter().any(|(seen, _)| *seen == cell) {
                continue;
            }
            old_colors.push((cell, sheet.cells[idx].background()));
        }
        Ok(Command::ChangeBackground(ChangeBackground {
            old_colors,
            new_color,
        }))
    }

    /// Label shown after "Undo"/"Redo" in menus.
    pub fn title(&self) -> &'static str {
        match self {
            Command::ChangeText(_) => "text change",
            Command::ChangeBackground(_) => "background color change",
        }
    }

    pub(crate) fn execute(&mut self, sheet: &mut Spreadsheet) {
        log::debug!("apply {}", self.title());
        match self {
            Command::ChangeText(cmd) => {
                if let Some(idx) = sheet.index(cmd.cell) {
                    // Undo restores the text present when this last ran.
                    cmd.old_text = sheet.cells[idx].text().to_string();
                    sheet.apply_text(idx, &cmd.new_text);
                }
            }
            Command::ChangeBackground(cmd) => {
                for (cell, _) in &cmd.old_colors {
                    if let Some(idx) = sheet.index(*cell) {
                        sheet.apply_background(idx, cmd.new_color);
                    }
                }
            }
        }
    }

    pub(crate) fn undo(&self, sheet: &mut Spreadsheet) {
        log::debug!("revert {}", self.title());
        match self {
            Command::ChangeText(cmd) => {
                if let Some(idx) = sheet.index(cmd.cell) {
                    sheet.apply_text(idx, &cmd.old_text);
                }
            }
            Command::ChangeBackground(cmd) => {
                for (cell, color) in &cmd.old_colors {
                    if let Some(idx) = sheet.index(*cell) {
                        sheet.apply_background(idx, *color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn a1() -> CellRef {
        CellRef::new(0, 0)
    }

    #[test]
    fn test_titles() {
        let sheet = Spreadsheet::new(2, 2).unwrap();
        let text = Command::change_text(&sheet, a1(), "x").unwrap();
        let color = Command::change_background(&sheet, [a1()], Color(0xFF00FF00)).unwrap();
        assert_eq!(text.title(), "text change");
        assert_eq!(color.title(), "background color change");
    }

    #[test]
    fn test_constructors_validate_cells() {
        let sheet = Spreadsheet::new(2, 2).unwrap();
        let outside = CellRef::new(5, 0);
        assert!(matches!(
            Command::change_text(&sheet, outside, "x"),
            Err(CoreError::OutOfBounds(cell)) if cell == outside
        ));
        assert!(Command::change_background(&sheet, [a1(), outside], Color::DEFAULT).is_err());
    }

    #[test]
    fn test_change_text_captures_old_text() {
        let mut sheet = Spreadsheet::new(2, 2).unwrap();
        sheet.set_text(a1(), "before").unwrap();
        let Command::ChangeText(cmd) = Command::change_text(&sheet, a1(), "after").unwrap() else {
            panic!("expected text command");
        };
        assert_eq!(cmd.old_text(), "before");
        assert_eq!(cmd.new_text(), "after");
    }

    #[test]
    fn test_change_background_dedups_cells() {
        let sheet = Spreadsheet::new(2, 2).unwrap();
        let b1 = CellRef::new(0, 1);
        let Command::ChangeBackground(cmd) =
            Command::change_background(&sheet, [a1(), b1, a1()], Color(0xFF0000FF)).unwrap()
        else {
            panic!("expected color command");
        };
        assert_eq!(cmd.cells().collect::<Vec<_>>(), vec![a1(), b1]);
        assert_eq!(cmd.new_color(), Color(0xFF0000FF));
    }

    #[test]
    fn test_execute_then_undo_restores_state() {
        let mut sheet = Spreadsheet::new(2, 2).unwrap();
        sheet.set_text(a1(), "old").unwrap();
        let mut cmd = Command::change_text(&sheet, a1(), "=2*3").unwrap();

        cmd.execute(&mut sheet);
        assert_eq!(sheet.cell_at(a1()).unwrap().value(), "6");

        cmd.undo(&mut sheet);
        assert_eq!(sheet.cell_at(a1()).unwrap().text(), "old");
        assert_eq!(sheet.cell_at(a1()).unwrap().value(), "old");
    }
}
