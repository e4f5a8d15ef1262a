//! Well-formedness check for package XML parts.

use std::mem;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::LoadError;

/// Read `xml` to the end and fail with [`LoadError::Xml`] unless it is a
/// single well-formed element: no mismatched or unclosed tags, exactly one
/// root and no stray text around it.
pub fn check_well_formed(xml: &str) -> Result<(), LoadError> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| LoadError::Xml(format!("at byte {}: {e}", reader.error_position())))?;

        match event {
            Event::Start(_) => {
                if depth == 0 {
                    check_single_root(&mut seen_root)?;
                }
                depth += 1;
            }
            Event::Empty(_) if depth == 0 => check_single_root(&mut seen_root)?,
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| LoadError::Xml("unexpected closing tag".to_string()))?;
            }
            Event::Text(t) if depth == 0 => {
                if t.iter().any(|b| !b.is_ascii_whitespace()) {
                    return Err(LoadError::Xml(format!(
                        "text outside the root element at byte {}",
                        reader.buffer_position()
                    )));
                }
            }
            Event::CData(_) if depth == 0 => {
                return Err(LoadError::Xml("CDATA outside the root element".to_string()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(LoadError::Xml(format!("{depth} unclosed elements")));
    }
    if !seen_root {
        return Err(LoadError::Xml("no root element".to_string()));
    }
    Ok(())
}

fn check_single_root(seen_root: &mut bool) -> Result<(), LoadError> {
    if mem::replace(seen_root, true) {
        Err(LoadError::Xml("more than one root element".to_string()))
    } else {
        Ok(())
    }
}
