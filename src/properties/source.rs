//! Building property sources from TOML, JSON and `.properties` data.
//!
//! Conversion rules for structured data:
//!
//! - strings, integers, floats and booleans become scalars
//! - tables and objects become nodes
//! - TOML datetimes become strings
//! - arrays become one comma-joined string of their scalar members
//! - JSON `null`, and nested arrays or tables inside arrays, are dropped

use std::collections::BTreeMap;

use super::{PropertyMap, PropertyValue, Scalar};
use crate::core::{ModpropsError, Result};

/// Convert a JSON object into a source. Any other JSON value yields an empty source.
#[must_use]
pub fn from_json(value: serde_json::Value) -> PropertyMap {
    match value {
        serde_json::Value::Object(object) => from_json_object(object),
        _ => PropertyMap::new(),
    }
}

fn from_json_object(object: serde_json::Map<String, serde_json::Value>) -> PropertyMap {
    object
        .into_iter()
        .filter_map(|(key, value)| from_json_value(value).map(|value| (key, value)))
        .collect()
}

/// Convert one JSON value; `None` for `null`.
#[must_use]
pub fn from_json_value(value: serde_json::Value) -> Option<PropertyValue> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::Object(object) => Some(PropertyValue::Node(from_json_object(object))),
        serde_json::Value::Array(items) => {
            Some(join_scalars(items.into_iter().filter_map(json_scalar)))
        }
        scalar => json_scalar(scalar).map(PropertyValue::Scalar),
    }
}

fn json_scalar(value: serde_json::Value) -> Option<Scalar> {
    match value {
        serde_json::Value::String(text) => Some(Scalar::String(text)),
        serde_json::Value::Bool(flag) => Some(Scalar::Bool(flag)),
        serde_json::Value::Number(number) => number
            .as_i64()
            .map(Scalar::Integer)
            .or_else(|| number.as_f64().map(Scalar::Float)),
        _ => None,
    }
}

/// Convert a TOML table into a source.
#[must_use]
pub fn from_toml_table(table: toml::Table) -> PropertyMap {
    table.into_iter().map(|(key, value)| (key, from_toml_value(value))).collect()
}

/// Convert one TOML value.
#[must_use]
pub fn from_toml_value(value: toml::Value) -> PropertyValue {
    match value {
        toml::Value::Table(table) => PropertyValue::Node(from_toml_table(table)),
        toml::Value::Array(items) => join_scalars(items.into_iter().filter_map(toml_scalar)),
        scalar => toml_scalar(scalar).map_or_else(|| PropertyValue::from(""), PropertyValue::Scalar),
    }
}

fn toml_scalar(value: toml::Value) -> Option<Scalar> {
    match value {
        toml::Value::String(text) => Some(Scalar::String(text)),
        toml::Value::Integer(number) => Some(Scalar::Integer(number)),
        toml::Value::Float(number) => Some(Scalar::Float(number)),
        toml::Value::Boolean(flag) => Some(Scalar::Bool(flag)),
        toml::Value::Datetime(datetime) => Some(Scalar::String(datetime.to_string())),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

fn join_scalars(items: impl Iterator<Item = Scalar>) -> PropertyValue {
    let joined = items.map(|item| item.to_string()).collect::<Vec<_>>().join(",");
    PropertyValue::from(joined)
}

/// Convert parsed `.properties` entries into a source of string scalars.
#[must_use]
pub fn from_properties(entries: BTreeMap<String, String>) -> PropertyMap {
    entries.into_iter().map(|(key, value)| (key, PropertyValue::from(value))).collect()
}

/// Parse Java `.properties` content.
///
/// Supports `#` and `!` comment lines, `=`, `:` or whitespace between key and
/// value, backslash line continuations, and the escapes `\t`, `\n`, `\r`, `\f`
/// and `\uXXXX` (surrogate pairs included). Any other escaped character stands for
/// itself. A repeated key keeps its last value.
///
/// `file` only labels error messages.
///
/// # Errors
///
/// Returns [`ModpropsError::PropertiesParseError`] for a malformed `\u` escape.
///
/// ```rust
/// use modprops::properties::source::parse_properties;
///
/// let entries = parse_properties("minecraft.version = 1.21\nmod_name:Demo \\\n  Mod\n", "gradle.properties")?;
/// assert_eq!(entries["minecraft.version"], "1.21");
/// assert_eq!(entries["mod_name"], "Demo Mod");
/// # Ok::<(), modprops::core::ModpropsError>(())
/// ```
pub fn parse_properties(content: &str, file: &str) -> Result<BTreeMap<String, String>> {
    let mut entries = BTreeMap::new();
    for (line, logical) in logical_lines(content) {
        let (key, value) = split_entry(&logical);
        let key = unescape(key, file, line)?;
        let value = unescape(value, file, line)?;
        entries.insert(key, value);
    }
    Ok(entries)
}

const WHITESPACE: [char; 3] = [' ', '\t', '\u{c}'];

/// Join continued lines, dropping blanks and comments. Yields the starting line number.
fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (index, raw) in content.lines().enumerate() {
        let trimmed = raw.trim_start_matches(WHITESPACE);
        let (body, continues) = split_continuation(trimmed);

        let current = match pending.take() {
            Some((start, mut accumulated)) => {
                accumulated.push_str(body);
                (start, accumulated)
            }
            None => {
                if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
                    continue;
                }
                (index + 1, body.to_string())
            }
        };

        if continues {
            pending = Some(current);
        } else {
            lines.push(current);
        }
    }

    lines.extend(pending);
    lines
}

/// Strip a continuation backslash. An even run of trailing backslashes is escaped text.
fn split_continuation(line: &str) -> (&str, bool) {
    let trailing = line.chars().rev().take_while(|c| *c == '\\').count();
    if trailing % 2 == 1 {
        (&line[..line.len() - 1], true)
    } else {
        (line, false)
    }
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut value_start = line.len();

    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = index;
                value_start = index + 1;
                break;
            }
            c if WHITESPACE.contains(&c) => {
                key_end = index;
                let rest = line[index..].trim_start_matches(WHITESPACE);
                let offset = line.len() - rest.len();
                value_start = if rest.starts_with(['=', ':']) {
                    offset + 1
                } else {
                    offset
                };
                break;
            }
            _ => {}
        }
    }

    (&line[..key_end], line[value_start..].trim_start_matches(WHITESPACE))
}

fn unescape(text: &str, file: &str, line: usize) -> Result<String> {
    let error = |reason: String| ModpropsError::PropertiesParseError {
        file: file.to_string(),
        line,
        reason,
    };

    let mut out = String::with_capacity(text.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        let decoded = match c {
            '\\' => match chars.next() {
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    let unit = (hex.len() == 4)
                        .then(|| u16::from_str_radix(&hex, 16).ok())
                        .flatten()
                        .ok_or_else(|| error(format!("malformed \\u escape '\\u{hex}'")))?;
                    units.push(unit);
                    continue;
                }
                Some('t') => '\t',
                Some('n') => '\n',
                Some('r') => '\r',
                Some('f') => '\u{c}',
                Some(other) => other,
                None => continue,
            },
            other => other,
        };
        flush_units(&mut units, &mut out).map_err(error)?;
        out.push(decoded);
    }
    flush_units(&mut units, &mut out).map_err(error)?;

    Ok(out)
}

fn flush_units(units: &mut Vec<u16>, out: &mut String) -> std::result::Result<(), String> {
    for decoded in char::decode_utf16(units.drain(..)) {
        let c = decoded.map_err(|e| format!("unpaired surrogate {:#06x}", e.unpaired_surrogate()))?;
        out.push(c);
    }
    Ok(())
}
