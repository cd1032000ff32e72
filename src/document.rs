/*
 * This file is part of FAU201 Panel.
 *
 * Copyright (C) 2025 FAU201 Panel contributors
 *
 * FAU201 Panel is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * FAU201 Panel is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with FAU201 Panel. If not, see <https://www.gnu.org/licenses/>.
 */

//! Settings document codec.
//!
//! Maps between a voltage value and the on-disk XML document:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <settings target="FAU200">
//!   <setting name="voltage" value="5.25"/>
//! </settings>
//! ```
//!
//! Parsing yields a flat list of `(name, value)` records rather than a node
//! tree, so the applier never walks XML itself.

use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

/// Required root element tag.
pub const ROOT_TAG: &str = "settings";
/// The field name written on save and recognized by the applier. Matched
/// case-insensitively on load.
pub const VOLTAGE_FIELD: &str = "voltage";
/// Required value of the root `target` attribute (device family).
pub const DEVICE_TARGET: &str = "FAU200";

const SETTING_TAG: &str = "setting";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed XML: {0}")]
    Malformed(String),
}

impl From<quick_xml::Error> for ParseError {
    fn from(e: quick_xml::Error) -> Self {
        ParseError::Malformed(e.to_string())
    }
}

impl From<AttrError> for ParseError {
    fn from(e: AttrError) -> Self {
        ParseError::Malformed(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("not a {DEVICE_TARGET} settings file (root <{root}> with target {target:?})")]
    WrongTarget {
        root: String,
        target: Option<String>,
    },
}

/// One `(name, value)` pair extracted from a `setting` element.
///
/// `raw_value` is the unparsed attribute text; it is empty when the `value`
/// attribute is absent, which downstream treats as an invalid numeric value
/// for recognized fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRecord {
    pub name: String,
    pub raw_value: String,
}

/// A parsed settings document: root identity plus all `setting` records in
/// document order. Created per load and discarded when the load completes.
#[derive(Debug, Clone)]
pub struct SettingsDocument {
    root_tag: String,
    target: Option<String>,
    settings: Vec<SettingRecord>,
}

impl SettingsDocument {
    pub fn root_tag(&self) -> &str {
        &self.root_tag
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// All `setting` elements found anywhere under the root, document order.
    pub fn settings(&self) -> &[SettingRecord] {
        &self.settings
    }

    pub fn is_valid_schema(&self) -> bool {
        self.root_tag == ROOT_TAG && self.target.as_deref() == Some(DEVICE_TARGET)
    }

    /// Schema check as a hard error, distinct from [`ParseError`] so the
    /// caller can report "incompatible file" rather than "corrupted file".
    pub fn validate_schema(&self) -> Result<(), SchemaError> {
        if self.is_valid_schema() {
            Ok(())
        } else {
            Err(SchemaError::WrongTarget {
                root: self.root_tag.clone(),
                target: self.target.clone(),
            })
        }
    }
}

fn attribute(el: &BytesStart<'_>, key: &str) -> Result<Option<String>, ParseError> {
    match el.try_get_attribute(key)? {
        Some(attr) => {
            let value = attr
                .unescape_value()
                .map_err(|e| ParseError::Malformed(e.to_string()))?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}

fn tag_name(el: &BytesStart<'_>) -> Result<String, ParseError> {
    std::str::from_utf8(el.name().as_ref())
        .map(str::to_owned)
        .map_err(|e| ParseError::Malformed(e.to_string()))
}

/// Parse a settings document from raw file bytes.
///
/// Fails with [`ParseError::Malformed`] on anything that is not a single
/// well-formed XML document: truncated input, mismatched tags, attribute
/// syntax errors, missing root, or trailing elements after the root closes.
/// Schema validity (root tag and target) is a separate, later check.
pub fn parse(bytes: &[u8]) -> Result<SettingsDocument, ParseError> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();

    let mut root: Option<(String, Option<String>)> = None;
    let mut root_closed = false;
    let mut depth = 0usize;
    let mut settings = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(el) => {
                let name = tag_name(&el)?;
                if root_closed {
                    return Err(ParseError::Malformed("content after document root".into()));
                }
                if depth == 0 {
                    let target = attribute(&el, "target")?;
                    root = Some((name, target));
                } else if name == SETTING_TAG {
                    settings.push(SettingRecord {
                        name: attribute(&el, "name")?.unwrap_or_default(),
                        raw_value: attribute(&el, "value")?.unwrap_or_default(),
                    });
                }
                depth += 1;
            }
            // Self-closing elements open and close in one event.
            Event::Empty(el) => {
                let name = tag_name(&el)?;
                if root_closed {
                    return Err(ParseError::Malformed("content after document root".into()));
                }
                if depth == 0 {
                    let target = attribute(&el, "target")?;
                    root = Some((name, target));
                    root_closed = true;
                } else if name == SETTING_TAG {
                    settings.push(SettingRecord {
                        name: attribute(&el, "name")?.unwrap_or_default(),
                        raw_value: attribute(&el, "value")?.unwrap_or_default(),
                    });
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if depth != 0 {
        return Err(ParseError::Malformed("unexpected end of input".into()));
    }
    match root {
        Some((root_tag, target)) => Ok(SettingsDocument {
            root_tag,
            target,
            settings,
        }),
        None => Err(ParseError::Malformed("no root element".into())),
    }
}

fn write_document(voltage: f64) -> Result<Vec<u8>, quick_xml::Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut root = BytesStart::new(ROOT_TAG);
    root.push_attribute(("target", DEVICE_TARGET));
    writer.write_event(Event::Start(root))?;

    let mut setting = BytesStart::new(SETTING_TAG);
    setting.push_attribute(("name", VOLTAGE_FIELD));
    setting.push_attribute(("value", voltage.to_string().as_str()));
    writer.write_event(Event::Empty(setting))?;

    writer.write_event(Event::End(BytesEnd::new(ROOT_TAG)))?;
    Ok(writer.into_inner())
}

/// Render the settings document for the given voltage.
///
/// Deterministic: one `setting` element, value in the default decimal
/// rendering of `f64`.
pub fn serialize(voltage: f64) -> Vec<u8> {
    // Writing into an in-memory buffer does not fail.
    write_document(voltage).unwrap_or_default()
}
