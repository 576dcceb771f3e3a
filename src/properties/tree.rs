//! The merged property tree.

use strsim::levenshtein;

use super::value::map_to_json;
use super::{PropertyMap, PropertyValue};
use crate::core::Result;

/// Maximum Levenshtein distance, as a percentage of the target length, for a path
/// to count as a suggestion.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Read-only result of merging property sources.
///
/// Queries take dotted paths of normalized segments, e.g. `minecraft.range.fabric`.
/// Nothing here forces a deferred value except the text and JSON conversions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyTree {
    root: PropertyMap,
}

impl PropertyTree {
    #[must_use]
    pub const fn new(root: PropertyMap) -> Self {
        Self {
            root,
        }
    }

    /// The top-level mapping.
    #[must_use]
    pub const fn root(&self) -> &PropertyMap {
        &self.root
    }

    #[must_use]
    pub fn into_map(self) -> PropertyMap {
        self.root
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Value at a dotted path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&PropertyValue> {
        let mut segments = path.split('.');
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = current.as_node()?.get(segment)?;
        }
        Some(current)
    }

    /// Text of the leaf at a dotted path, forcing it if deferred.
    ///
    /// # Errors
    ///
    /// Returns the error of a failing deferred value.
    pub fn text(&self, path: &str) -> Result<Option<String>> {
        match self.get(path) {
            Some(value) => value.to_text(),
            None => Ok(None),
        }
    }

    /// The whole tree as a JSON object, forcing every deferred value.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing deferred value.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        map_to_json(&self.root)
    }

    /// Every leaf as `(dotted path, text)`, in path order, forcing deferred values.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing deferred value.
    pub fn flatten(&self) -> Result<Vec<(String, String)>> {
        let mut entries = Vec::new();
        flatten_into(&self.root, "", &mut entries)?;
        Ok(entries)
    }

    /// Dotted paths of every leaf, without forcing anything.
    #[must_use]
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_paths(&self.root, "", &mut paths);
        paths
    }

    /// Up to three leaf paths close to `target`, closest first.
    #[must_use]
    pub fn similar_paths(&self, target: &str) -> Vec<String> {
        let max_distance = target.len() * SIMILARITY_THRESHOLD_PERCENT / 100;
        let mut scored: Vec<(String, usize)> = self
            .leaf_paths()
            .into_iter()
            .map(|path| {
                let distance = levenshtein(target, &path);
                (path, distance)
            })
            .filter(|(_, distance)| *distance <= max_distance)
            .collect();
        scored.sort_by_key(|(_, distance)| *distance);
        scored.into_iter().take(3).map(|(path, _)| path).collect()
    }
}

fn flatten_into(map: &PropertyMap, prefix: &str, out: &mut Vec<(String, String)>) -> Result<()> {
    for (key, value) in map {
        let path = super::key::join_path(prefix, key);
        match value {
            PropertyValue::Node(child) => flatten_into(child, &path, out)?,
            leaf => {
                if let Some(text) = leaf.to_text()? {
                    out.push((path, text));
                }
            }
        }
    }
    Ok(())
}

fn collect_paths(map: &PropertyMap, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in map {
        let path = super::key::join_path(prefix, key);
        match value {
            PropertyValue::Node(child) => collect_paths(child, &path, out),
            _ => out.push(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::{DeferredValue, merge_sources, source};
    use serde_json::json;

    fn tree() -> PropertyTree {
        let mut deferred = PropertyMap::new();
        deferred.insert(
            "minecraft.range.fabric".to_string(),
            DeferredValue::from_fn(|| Ok("\"=1.21\"".to_string())).into(),
        );
        merge_sources([
            source::from_json(json!({
                "minecraftVersion": "1.21",
                "java": {"version": 21},
                "name": "demo"
            })),
            deferred,
        ])
        .unwrap()
    }

    #[test]
    fn test_get_by_path() {
        let tree = tree();
        assert_eq!(tree.get("minecraft.version"), Some(&PropertyValue::from("1.21")));
        assert!(tree.get("minecraft").is_some_and(|v| !v.is_leaf()));
        assert!(tree.get("minecraft.version.extra").is_none());
        assert!(tree.get("missing").is_none());
        assert!(tree.get("").is_none());
    }

    #[test]
    fn test_text_forces_deferred() {
        let tree = tree();
        assert_eq!(tree.text("minecraft.range.fabric").unwrap().as_deref(), Some("\"=1.21\""));
        assert_eq!(tree.text("java.version").unwrap().as_deref(), Some("21"));
        assert_eq!(tree.text("java").unwrap(), None);
        assert_eq!(tree.text("nope").unwrap(), None);
    }

    #[test]
    fn test_flatten_and_paths() {
        let tree = tree();
        assert_eq!(
            tree.leaf_paths(),
            vec!["java.version", "minecraft.range.fabric", "minecraft.version", "name"]
        );
        let flat = tree.flatten().unwrap();
        assert_eq!(flat[0], ("java.version".to_string(), "21".to_string()));
        assert_eq!(flat.len(), 4);
    }

    #[test]
    fn test_similar_paths() {
        let tree = tree();
        assert_eq!(
            tree.similar_paths("minecraft.versoin").first().map(String::as_str),
            Some("minecraft.version")
        );
        assert!(tree.similar_paths("zzz").is_empty());
    }
}
