//! Property key normalization.
//!
//! Raw keys arrive in two shapes: dotted paths (`minecraft.version`) and camel-cased
//! names (`minecraftVersion`). Both normalize to the same path segments.

use regex::Regex;
use std::sync::LazyLock;

/// Keys with this exact name are never descended into.
///
/// Build systems expose a `properties` accessor that returns the map it belongs to;
/// recursing into it never terminates.
pub const GUARD_KEY: &str = "properties";

/// Synthetic key holding a scalar that shares its path with nested refinements.
pub const SENTINEL_KEY: &str = "_";

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("([a-z])([A-Z])").expect("camel boundary pattern is valid"));

/// Split a raw key into normalized path segments.
///
/// A key without `.` that is not entirely lower-case is treated as camel case: a
/// `.` goes between every lower-case letter and the upper-case letter after it,
/// and the result is lower-cased. Any other key is split as-is. Trailing empty
/// segments are dropped.
///
/// ```rust
/// use modprops::properties::normalize_key;
///
/// assert_eq!(normalize_key("minecraftVersion"), ["minecraft", "version"]);
/// assert_eq!(normalize_key("already.lower"), ["already", "lower"]);
/// assert_eq!(normalize_key("Mixed.Case"), ["Mixed", "Case"]);
/// ```
#[must_use]
pub fn normalize_key(key: &str) -> Vec<String> {
    let normalized = if !key.contains('.') && key.to_lowercase() != key {
        CAMEL_BOUNDARY.replace_all(key, "$1.$2").to_lowercase()
    } else {
        key.to_string()
    };

    let mut segments: Vec<String> = normalized.split('.').map(str::to_string).collect();
    while segments.len() > 1 && segments.last().is_some_and(String::is_empty) {
        segments.pop();
    }
    segments
}

/// Join a parent path and a child segment for messages.
pub(crate) fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}
