//! Property values.

use std::collections::BTreeMap;
use std::fmt;

use super::DeferredValue;
use crate::core::Result;

/// A mapping from key to property value.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// A plain value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// Whether this is a string with nothing but whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::String(text) if text.trim().is_empty())
    }

    /// Convert to a JSON value.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(text) => serde_json::Value::String(text.clone()),
            Self::Integer(number) => serde_json::Value::from(*number),
            Self::Float(number) => serde_json::Value::from(*number),
            Self::Bool(flag) => serde_json::Value::Bool(*flag),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(text) => f.write_str(text),
            Self::Integer(number) => write!(f, "{number}"),
            Self::Float(number) => write!(f, "{number}"),
            Self::Bool(flag) => write!(f, "{flag}"),
        }
    }
}

/// A value in a property source or in the merged tree.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// A plain value
    Scalar(Scalar),
    /// A value computed only when text is requested
    Deferred(DeferredValue),
    /// A nested mapping
    Node(PropertyMap),
}

impl PropertyValue {
    /// Whether the value is a scalar or deferred value.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        !matches!(self, Self::Node(_))
    }

    /// The nested mapping, if this is a node.
    #[must_use]
    pub const fn as_node(&self) -> Option<&PropertyMap> {
        match self {
            Self::Node(map) => Some(map),
            _ => None,
        }
    }

    /// Whether cleanup should drop the value: a blank string or an empty node.
    ///
    /// Deferred values are never considered blank, since telling would force them.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Scalar(scalar) => scalar.is_blank(),
            Self::Deferred(_) => false,
            Self::Node(map) => map.is_empty(),
        }
    }

    /// Text of a leaf, forcing deferred values. Nodes yield `None`.
    ///
    /// # Errors
    ///
    /// Returns the error of a failing deferred value.
    pub fn to_text(&self) -> Result<Option<String>> {
        match self {
            Self::Scalar(scalar) => Ok(Some(scalar.to_string())),
            Self::Deferred(deferred) => deferred.resolve().map(|text| Some(text.to_string())),
            Self::Node(_) => Ok(None),
        }
    }

    /// Convert to JSON, forcing every deferred value.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing deferred value.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        match self {
            Self::Scalar(scalar) => Ok(scalar.to_json()),
            Self::Deferred(deferred) => Ok(serde_json::Value::String(deferred.resolve()?.to_string())),
            Self::Node(map) => map_to_json(map),
        }
    }
}

/// Convert a whole mapping to a JSON object, forcing deferred values.
///
/// # Errors
///
/// Returns the error of the first failing deferred value.
pub fn map_to_json(map: &PropertyMap) -> Result<serde_json::Value> {
    let mut object = serde_json::Map::with_capacity(map.len());
    for (key, value) in map {
        object.insert(key.clone(), value.to_json()?);
    }
    Ok(serde_json::Value::Object(object))
}

impl From<Scalar> for PropertyValue {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Scalar(Scalar::String(value))
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::Integer(value))
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Scalar(Scalar::Float(value))
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

impl From<DeferredValue> for PropertyValue {
    fn from(value: DeferredValue) -> Self {
        Self::Deferred(value)
    }
}

impl From<PropertyMap> for PropertyValue {
    fn from(value: PropertyMap) -> Self {
        Self::Node(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blankness() {
        assert!(PropertyValue::from("  ").is_blank());
        assert!(PropertyValue::from(PropertyMap::new()).is_blank());
        assert!(!PropertyValue::from(0_i64).is_blank());
        assert!(!PropertyValue::from(false).is_blank());
        assert!(!PropertyValue::from(DeferredValue::ready("")).is_blank());
    }

    #[test]
    fn test_to_text() {
        assert_eq!(PropertyValue::from(21_i64).to_text().unwrap().as_deref(), Some("21"));
        assert_eq!(PropertyValue::from(true).to_text().unwrap().as_deref(), Some("true"));
        assert_eq!(
            PropertyValue::from(DeferredValue::ready("=1.21")).to_text().unwrap().as_deref(),
            Some("=1.21")
        );
        assert_eq!(PropertyValue::from(PropertyMap::new()).to_text().unwrap(), None);
    }

    #[test]
    fn test_to_json() {
        let mut inner = PropertyMap::new();
        inner.insert("version".to_string(), "1.21".into());
        inner.insert("range".to_string(), DeferredValue::ready("[1.21]").into());
        let mut map = PropertyMap::new();
        map.insert("minecraft".to_string(), inner.into());
        map.insert("java".to_string(), 21_i64.into());

        assert_eq!(
            map_to_json(&map).unwrap(),
            serde_json::json!({
                "java": 21,
                "minecraft": { "range": "[1.21]", "version": "1.21" }
            })
        );
    }
}
