//! Storage for the XML spreadsheet format.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <spreadsheet>
//!   <cell name="A1">
//!     <bgcolor>FFFF0000</bgcolor>
//!     <text>=B1+5</text>
//!   </cell>
//! </spreadsheet>
//! ```
//!
//! Only cells with text or a non-default background are written. Both child
//! elements are optional.

mod parser;
mod writer;

pub use parser::{parse_xml, parse_xml_content};
pub use writer::{write_xml, write_xml_content};

use cellgrid_engine::engine::{Cell, Color};

/// One `<cell>` element.
#[derive(Clone, Debug, PartialEq)]
pub struct CellRecord {
    /// Cell name as written in the file, e.g. `B2`
    pub name: String,
    pub text: String,
    pub background: Color,
}

impl CellRecord {
    pub fn from_cell(cell: &Cell) -> CellRecord {
        CellRecord {
            name: cell.name(),
            text: cell.text().to_string(),
            background: cell.background(),
        }
    }
}
