//! Parser for the XML spreadsheet format

use crate::error::{CoreError, Result};
use cellgrid_engine::engine::Color;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::io::BufRead;

use super::CellRecord;

/// Child element of `<cell>` whose text is being collected.
#[derive(Clone, Copy, PartialEq)]
enum Field {
    Text,
    Background,
}

/// A `<cell>` element that has been opened but not yet closed.
struct PendingCell {
    name: String,
    text: String,
    bgcolor: Option<String>,
    field: Option<Field>,
}

impl PendingCell {
    fn from_start(e: &BytesStart) -> Result<PendingCell> {
        let mut name = None;
        for attr in e.attributes() {
            let attr = attr?;
            if attr.key.as_ref() == b"name" {
                name = Some(attr.unescape_value()?.into_owned());
            }
        }
        let name = name.ok_or_else(|| CoreError::Malformed("<cell> without a name attribute".to_string()))?;
        Ok(PendingCell {
            name,
            text: String::new(),
            bgcolor: None,
            field: None,
        })
    }

    fn push_str(&mut self, chunk: &str) {
        match self.field {
            Some(Field::Text) => self.text.push_str(chunk),
            Some(Field::Background) => self.bgcolor.get_or_insert_with(String::new).push_str(chunk),
            None => {}
        }
    }

    fn finish(self) -> Result<CellRecord> {
        let background = match self.bgcolor {
            Some(hex) => Color::from_hex(&hex).ok_or(CoreError::InvalidColor(hex))?,
            None => Color::DEFAULT,
        };
        Ok(CellRecord {
            name: self.name,
            text: self.text,
            background,
        })
    }
}

/// Parse XML spreadsheet content from a string
pub fn parse_xml_content(content: &str) -> Result<Vec<CellRecord>> {
    parse_xml(content.as_bytes())
}

/// Parse an XML spreadsheet from a reader into cell records, in document order.
///
/// Unknown attributes and elements are ignored. Anything that is not
/// well-formed XML with a single `<spreadsheet>` root is an error.
pub fn parse_xml<R: BufRead>(source: R) -> Result<Vec<CellRecord>> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();

    let mut records = Vec::new();
    // Names of the currently open elements, outermost first
    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut current: Option<PendingCell> = None;
    let mut seen_root = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                match open.len() {
                    0 => expect_root(&name, &mut seen_root)?,
                    1 if name == b"cell" => current = Some(PendingCell::from_start(&e)?),
                    2 => {
                        if let Some(cell) = current.as_mut() {
                            cell.field = match name.as_slice() {
                                b"text" => {
                                    cell.text.clear();
                                    Some(Field::Text)
                                }
                                b"bgcolor" => {
                                    cell.bgcolor = Some(String::new());
                                    Some(Field::Background)
                                }
                                _ => None,
                            };
                        }
                    }
                    _ => {}
                }
                open.push(name);
            }
            Event::Empty(e) => {
                let name = e.name().as_ref().to_vec();
                match open.len() {
                    0 => expect_root(&name, &mut seen_root)?,
                    1 if name == b"cell" => records.push(PendingCell::from_start(&e)?.finish()?),
                    2 => {
                        if let Some(cell) = current.as_mut() {
                            match name.as_slice() {
                                b"text" => cell.text.clear(),
                                b"bgcolor" => cell.bgcolor = Some(String::new()),
                                _ => {}
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::End(_) => {
                if open.pop().is_none() {
                    return Err(CoreError::Malformed("unexpected closing tag".to_string()));
                }
                match open.len() {
                    1 => {
                        if let Some(cell) = current.take() {
                            records.push(cell.finish()?);
                        }
                    }
                    2 => {
                        if let Some(cell) = current.as_mut() {
                            cell.field = None;
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                if open.is_empty() && !text.trim().is_empty() {
                    return Err(CoreError::Malformed("text outside the root element".to_string()));
                }
                if open.len() == 3 {
                    if let Some(cell) = current.as_mut() {
                        cell.push_str(&text);
                    }
                }
            }
            Event::CData(e) => {
                if open.len() == 3 {
                    if let Some(cell) = current.as_mut() {
                        cell.push_str(&String::from_utf8_lossy(&e));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(name) = open.last() {
        return Err(CoreError::Malformed(format!(
            "unexpected end of document inside <{}>",
            String::from_utf8_lossy(name)
        )));
    }
    if !seen_root {
        return Err(CoreError::Malformed("missing <spreadsheet> root element".to_string()));
    }

    Ok(records)
}

fn expect_root(name: &[u8], seen_root: &mut bool) -> Result<()> {
    if *seen_root {
        return Err(CoreError::Malformed("more than one root element".to_string()));
    }
    if name != b"spreadsheet" {
        return Err(CoreError::Malformed(format!(
            "expected <spreadsheet> root, found <{}>",
            String::from_utf8_lossy(name)
        )));
    }
    *seen_root = true;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(name: &str, text: &str, background: u32) -> CellRecord {
        CellRecord {
            name: name.to_string(),
            text: text.to_string(),
            background: Color(background),
        }
    }

    #[test]
    fn test_parse_basic_document() {
        let content = r#"<?xml version="1.0" encoding="UTF-8"?>
<spreadsheet>
  <cell name="A1">
    <bgcolor>FFFF0000</bgcolor>
    <text>Hello</text>
  </cell>
  <cell name="B2">
    <text>=A1+5</text>
  </cell>
</spreadsheet>
"#;
        let records = parse_xml_content(content).unwrap();
        assert_eq!(
            records,
            vec![record("A1", "Hello", 0xFFFF0000), record("B2", "=A1+5", 0xFFFFFFFF)]
        );
    }

    #[test]
    fn test_unknown_attributes_and_elements_are_ignored() {
        let content = r#"
            <spreadsheet unusedattr="abc">
                <cell name="A1" extrainfo="123">
                    <bgcolor>FF00FF00</bgcolor>
                    <text>=B1+10</text>
                    <trash1>Ignore me</trash1>
                </cell>
                <other><text>not a cell</text></other>
                <cell name="B1">
                    <text>5</text>
                    <bgcolor>FF0000FF</bgcolor>
                    <trash>Data</trash>
                </cell>
            </spreadsheet>"#;
        let records = parse_xml_content(content).unwrap();
        assert_eq!(
            records,
            vec![record("A1", "=B1+10", 0xFF00FF00), record("B1", "5", 0xFF0000FF)]
        );
    }

    #[test]
    fn test_text_is_unescaped_and_keeps_whitespace() {
        let content = "<spreadsheet><cell name=\"A1\"><text>  a &lt; b &amp; c  </text></cell></spreadsheet>";
        let records = parse_xml_content(content).unwrap();
        assert_eq!(records[0].text, "  a < b & c  ");
    }

    #[test]
    fn test_cdata_text() {
        let content = "<spreadsheet><cell name=\"A1\"><text><![CDATA[<raw>]]></text></cell></spreadsheet>";
        assert_eq!(parse_xml_content(content).unwrap()[0].text, "<raw>");
    }

    #[test]
    fn test_empty_elements() {
        let content = "<spreadsheet><cell name=\"C3\"/><cell name=\"A1\"><text/></cell></spreadsheet>";
        let records = parse_xml_content(content).unwrap();
        assert_eq!(records, vec![record("C3", "", 0xFFFFFFFF), record("A1", "", 0xFFFFFFFF)]);

        assert!(parse_xml_content("<spreadsheet/>").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_documents_are_errors() {
        for content in [
            "",
            "not xml at all",
            "<spreadsheet><cell name=\"A1\"><text>x</text></cell>",
            "<spreadsheet><cell name=\"A1\"></text></cell></spreadsheet>",
            "<workbook></workbook>",
            "<spreadsheet></spreadsheet><spreadsheet></spreadsheet>",
            "<spreadsheet><cell><text>x</text></cell></spreadsheet>",
        ] {
            assert!(parse_xml_content(content).is_err(), "accepted {:?}", content);
        }
    }

    #[test]
    fn test_invalid_color_is_error() {
        let content = "<spreadsheet><cell name=\"A1\"><bgcolor>red</bgcolor></cell></spreadsheet>";
        assert!(matches!(
            parse_xml_content(content),
            Err(CoreError::InvalidColor(value)) if value == "red"
        ));
    }
}
