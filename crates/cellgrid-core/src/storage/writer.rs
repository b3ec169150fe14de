//! Writer for the XML spreadsheet format

use crate::error::Result;
use quick_xml::escape::escape;
use std::io::Write;

use super::CellRecord;

/// Write cell records as an XML spreadsheet
pub fn write_xml<W: Write>(mut out: W, records: &[CellRecord]) -> Result<()> {
    out.write_all(write_xml_content(records).as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Render cell records as an XML string.
///
/// A default background or empty text is left out of its record.
pub fn write_xml_content(records: &[CellRecord]) -> String {
    let mut content = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<spreadsheet>\n");

    for record in records {
        content.push_str(&format!("  <cell name=\"{}\">\n", escape(record.name.as_str())));
        if !record.background.is_default() {
            content.push_str(&format!("    <bgcolor>{}</bgcolor>\n", record.background.to_hex()));
        }
        if !record.text.is_empty() {
            content.push_str(&format!("    <text>{}</text>\n", escape(record.text.as_str())));
        }
        content.push_str("  </cell>\n");
    }

    content.push_str("</spreadsheet>\n");
    content
}
