// Flat record decoder for OpenWebIf XML responses
//
// Every OpenWebIf listing is a sequence of identical record elements
// (`<e2service>`, `<e2movie>`, ...) whose direct children carry the values
// as text. This module turns such a body into a list of field maps and
// leaves typing to the callers.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use thiserror::Error;

/// Value returned by [`XmlRecord::get`] for a field the record does not carry.
pub const MISSING: &str = "?";

/// A body that could not be read as XML.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct XmlError(String);

impl XmlError {
    fn new(err: impl std::fmt::Display) -> Self {
        Self(err.to_string())
    }
}

/// The child fields of one record element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlRecord {
    fields: HashMap<String, String>,
}

impl XmlRecord {
    /// Text of the named child, or [`MISSING`] when the child is absent.
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map_or(MISSING, String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for XmlRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Decode every `<tag>` element of `xml`, in document order.
///
/// A field's value is the text of the child element including the text of
/// its descendants, with entity references resolved and surrounding
/// whitespace trimmed. When a child repeats, the last one wins. Elements
/// named `tag` that appear inside a record are treated as ordinary fields.
pub fn records(xml: &str, tag: &str) -> Result<Vec<XmlRecord>, XmlError> {
    let mut reader = Reader::from_str(xml);
    let mut out = Vec::new();

    let mut current: Option<XmlRecord> = None;
    // Depth below the open record element; 1 means inside a direct child.
    let mut depth = 0usize;
    let mut field: Option<(String, String)> = None;

    loop {
        match reader.read_event().map_err(XmlError::new)? {
            Event::Start(e) => {
                if current.is_some() {
                    depth += 1;
                    if depth == 1 {
                        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                        field = Some((name, String::new()));
                    }
                } else if e.name().as_ref() == tag.as_bytes() {
                    current = Some(XmlRecord::default());
                    depth = 0;
                }
            }
            Event::Empty(e) => match current.as_mut() {
                Some(record) if depth == 0 => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    record.fields.insert(name, String::new());
                }
                Some(_) => {}
                None => {
                    if e.name().as_ref() == tag.as_bytes() {
                        out.push(XmlRecord::default());
                    }
                }
            },
            Event::End(_) => {
                if depth == 0 {
                    out.extend(current.take());
                } else {
                    if depth == 1 {
                        if let (Some(record), Some((name, text))) = (current.as_mut(), field.take())
                        {
                            record.fields.insert(name, text.trim().to_owned());
                        }
                    }
                    depth -= 1;
                }
            }
            Event::Text(e) => {
                if let Some((_, text)) = field.as_mut() {
                    text.push_str(&e.decode().map_err(XmlError::new)?);
                }
            }
            Event::CData(e) => {
                if let Some((_, text)) = field.as_mut() {
                    text.push_str(&e.decode().map_err(XmlError::new)?);
                }
            }
            Event::GeneralRef(e) => {
                if let Some((_, text)) = field.as_mut() {
                    if let Some(ch) = e.resolve_char_ref().map_err(XmlError::new)? {
                        text.push(ch);
                    } else {
                        let name = e.decode().map_err(XmlError::new)?;
                        match resolve_predefined_entity(&name) {
                            Some(value) => text.push_str(value),
                            None => {
                                text.push('&');
                                text.push_str(&name);
                                text.push(';');
                            }
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if current.is_some() {
        return Err(XmlError(format!("unterminated <{tag}> element")));
    }

    Ok(out)
}
