//! Core document properties from `docProps/core.xml`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

/// Author and dates of a document.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CoreProperties {
    pub author: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy)]
enum Field {
    Author,
    Created,
    Modified,
}

/// Parse the core properties part.
pub fn parse_core(xml: &str) -> Result<CoreProperties, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut props = CoreProperties::default();
    let mut field = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                field = match e.local_name().as_ref() {
                    b"creator" => Some(Field::Author),
                    b"created" => Some(Field::Created),
                    b"modified" => Some(Field::Modified),
                    _ => None,
                };
            }
            Event::Text(t) => {
                let Some(current) = field else { continue };
                let text = t.unescape()?;
                let text = text.trim();
                match current {
                    Field::Author => props.author = Some(text.to_string()),
                    Field::Created => props.created = parse_w3cdtf(text),
                    Field::Modified => props.modified = parse_w3cdtf(text),
                }
            }
            Event::End(_) => field = None,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(props)
}

/// Parse a W3C date-time (`2024-01-02T03:04:05Z`, or a bare date).
///
/// Values without an offset are taken as UTC; anything else yields `None`.
pub fn parse_w3cdtf(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    debug!("Unrecognized date {:?}", value);
    None
}
