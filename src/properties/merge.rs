//! Folding ordered property sources into one nested tree.
//!
//! Each source is a mapping whose keys may be dotted paths, camel-cased names or
//! plain names, and whose values may themselves be nested mappings. Sources are
//! processed one after the other into a shared result, so later sources win on
//! conflicting leaves.
//!
//! # Collisions
//!
//! | Situation | Outcome |
//! |-----------|---------|
//! | leaf, then leaf at the same path | later leaf replaces earlier |
//! | node, then node | deep merge, later leaves win |
//! | node, then leaf | leaf replaces node |
//! | leaf and nested keys in one source (`a`, `a.b`) | `{ a: { _: leaf, b: .. } }` |
//! | leaf, then `{ _: v }` from a later source | collapses to `v` |
//! | top-level leaf, then any other node from a later source | [`ConflictingMergeTypes`] |
//! | nested leaf, then a node from a later source | node replaces leaf |
//!
//! [`ConflictingMergeTypes`]: crate::core::ModpropsError::ConflictingMergeTypes

use std::collections::BTreeMap;
use tracing::{debug, trace};

use super::key::{GUARD_KEY, SENTINEL_KEY, join_path, normalize_key};
use super::{PropertyMap, PropertyTree, PropertyValue};
use crate::core::{ModpropsError, Result};

/// Accumulates sources into one tree.
///
/// # Examples
///
/// ```rust
/// use modprops::properties::{PropertyMap, PropertyTreeMerger};
///
/// let mut first = PropertyMap::new();
/// first.insert("minecraftVersion".into(), "1.21".into());
/// let mut second = PropertyMap::new();
/// second.insert("minecraft.range".into(), "[1.21]".into());
///
/// let mut merger = PropertyTreeMerger::new();
/// merger.add_source("gradle", first)?;
/// merger.add_source("overrides", second)?;
/// let tree = merger.finish();
///
/// assert_eq!(tree.text("minecraft.version")?.as_deref(), Some("1.21"));
/// assert_eq!(tree.text("minecraft.range")?.as_deref(), Some("[1.21]"));
/// # Ok::<(), modprops::core::ModpropsError>(())
/// ```
#[derive(Debug, Default)]
pub struct PropertyTreeMerger {
    result: PropertyMap,
    sources: usize,
}

impl PropertyTreeMerger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one source into the result. `name` is only used for logging.
    ///
    /// A failing source leaves the result as it was before the call.
    ///
    /// # Errors
    ///
    /// Returns [`ModpropsError::ConflictingMergeTypes`] when a leaf already in the
    /// result would have to become a node.
    pub fn add_source(&mut self, name: &str, source: PropertyMap) -> Result<&mut Self> {
        debug!("Merging property source '{}' ({} entries)", name, source.len());
        let mut scratch = self.result.clone();
        process_into(&mut scratch, source, "")?;
        self.result = scratch;
        self.sources += 1;
        Ok(self)
    }

    /// Number of sources folded so far.
    #[must_use]
    pub const fn source_count(&self) -> usize {
        self.sources
    }

    /// The merged tree.
    #[must_use]
    pub fn finish(self) -> PropertyTree {
        PropertyTree::new(self.result)
    }
}

/// Fold `sources` in order into a fresh tree.
///
/// # Errors
///
/// Returns the first [`ModpropsError::ConflictingMergeTypes`] encountered.
pub fn merge_sources(sources: impl IntoIterator<Item = PropertyMap>) -> Result<PropertyTree> {
    let mut merger = PropertyTreeMerger::new();
    for (index, source) in sources.into_iter().enumerate() {
        merger.add_source(&format!("#{index}"), source)?;
    }
    Ok(merger.finish())
}

/// Process one raw mapping into `result`.
///
/// `prefix` is the dotted path of `result` inside the whole tree and only shows up
/// in error messages.
///
/// # Errors
///
/// Returns [`ModpropsError::ConflictingMergeTypes`] when a leaf already in
/// `result` would have to become a node.
pub fn process_into(result: &mut PropertyMap, input: PropertyMap, prefix: &str) -> Result<()> {
    let mut groups: BTreeMap<String, Vec<(String, PropertyValue)>> = BTreeMap::new();
    for (raw_key, value) in input {
        if raw_key == GUARD_KEY {
            trace!("Skipping guarded key '{}'", join_path(prefix, &raw_key));
            continue;
        }
        let mut segments = normalize_key(&raw_key).into_iter();
        let root = segments.next().unwrap_or_default();
        let rest = segments.collect::<Vec<_>>().join(".");
        groups.entry(root).or_default().push((rest, value));
    }

    for (root, mut entries) in groups {
        let path = join_path(prefix, &root);
        let has_leaf = entries.iter().any(|(rest, _)| rest.trim().is_empty());
        let has_children = entries.iter().any(|(rest, _)| !rest.trim().is_empty());

        if has_leaf && has_children {
            trace!("Moving leaf at '{}' under '{}'", path, SENTINEL_KEY);
            for (rest, _) in &mut entries {
                if rest.trim().is_empty() {
                    *rest = SENTINEL_KEY.to_string();
                }
            }
        }

        if has_leaf && !has_children {
            let Some((_, value)) = entries.pop() else {
                continue;
            };
            match value {
                PropertyValue::Node(map) => {
                    let mut child = PropertyMap::new();
                    process_into(&mut child, map, &path)?;
                    if !child.is_empty() {
                        attach(result, root, child, &path)?;
                    }
                }
                leaf => {
                    result.insert(root, leaf);
                }
            }
        } else {
            let nested: PropertyMap = entries.into_iter().collect();
            let mut child = PropertyMap::new();
            process_into(&mut child, nested, &path)?;
            if child.is_empty() {
                continue;
            }

            match child.remove(SENTINEL_KEY) {
                Some(PropertyValue::Node(spliced)) => {
                    trace!("Splicing '{}' into '{}'", SENTINEL_KEY, path);
                    match result.get_mut(&root) {
                        Some(PropertyValue::Node(existing)) => merge_maps(existing, spliced),
                        None => {
                            result.insert(root.clone(), PropertyValue::Node(spliced));
                        }
                        Some(_) => return Err(conflict(&path)),
                    }
                }
                Some(leaf) => {
                    child.insert(SENTINEL_KEY.to_string(), leaf);
                }
                None => {}
            }

            attach(result, root, child, &path)?;
        }
    }

    result.retain(|_, value| !value.is_blank());
    Ok(())
}

/// Deep-merge `right` into `left`. On a type clash the value from `right` wins.
pub fn merge_maps(left: &mut PropertyMap, right: PropertyMap) {
    for (key, value) in right {
        match value {
            PropertyValue::Node(incoming) => match left.get_mut(&key) {
                Some(PropertyValue::Node(existing)) => merge_maps(existing, incoming),
                _ => {
                    left.insert(key, PropertyValue::Node(incoming));
                }
            },
            leaf => {
                left.insert(key, leaf);
            }
        }
    }
}

fn attach(result: &mut PropertyMap, root: String, mut child: PropertyMap, path: &str) -> Result<()> {
    match result.get_mut(&root) {
        None => {
            result.insert(root, PropertyValue::Node(child));
        }
        Some(PropertyValue::Node(existing)) => merge_maps(existing, child),
        Some(_) => {
            if child.len() != 1 {
                return Err(conflict(path));
            }
            let Some(collapsed) = child.remove(SENTINEL_KEY) else {
                return Err(conflict(path));
            };
            result.insert(root, collapsed);
        }
    }
    Ok(())
}

fn conflict(path: &str) -> ModpropsError {
    ModpropsError::ConflictingMergeTypes {
        key: path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::{DeferredValue, source};
    use serde_json::json;

    fn src(value: serde_json::Value) -> PropertyMap {
        source::from_json(value)
    }

    fn merged(sources: Vec<serde_json::Value>) -> Result<serde_json::Value> {
        merge_sources(sources.into_iter().map(src))?.to_json()
    }

    #[test]
    fn test_last_source_wins_on_leaf_conflict() {
        let result = merged(vec![json!({"a.b": 1}), json!({"a.b": 2})]).unwrap();
        assert_eq!(result, json!({"a": {"b": 2}}));
    }

    #[test]
    fn test_deep_merge_across_sources() {
        let result = merged(vec![json!({"a": {"b": 1}}), json!({"a.c": 2})]).unwrap();
        assert_eq!(result, json!({"a": {"b": 1, "c": 2}}));
    }

    #[test]
    fn test_camel_case_keys_merge_with_dotted_keys() {
        let result = merged(vec![
            json!({"minecraftVersion": "1.21"}),
            json!({"minecraft.range": {"neoforge": "[1.21]"}}),
        ])
        .unwrap();
        assert_eq!(
            result,
            json!({"minecraft": {"version": "1.21", "range": {"neoforge": "[1.21]"}}})
        );
    }

    #[test]
    fn test_leaf_and_children_in_one_source() {
        let result = merged(vec![json!({"a": 1, "a.b": 2})]).unwrap();
        assert_eq!(result, json!({"a": {"_": 1, "b": 2}}));
    }

    #[test]
    fn test_leaf_then_nested_across_sources_conflicts() {
        match merged(vec![json!({"a": 1}), json!({"a.b": 2})]) {
            Err(ModpropsError::ConflictingMergeTypes {
                key,
            }) => assert_eq!(key, "a"),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_leaf_replaced_during_deep_merge() {
        // Below the top level the incoming node is deep-merged, where the
        // right-hand side wins any clash.
        let result = merged(vec![json!({"x.y": 1}), json!({"x.y.z": 2})]).unwrap();
        assert_eq!(result, json!({"x": {"y": {"z": 2}}}));
    }

    #[test]
    fn test_sentinel_over_leaf_collapses() {
        let result = merged(vec![json!({"a": 1}), json!({"a": {"_": 5}})]).unwrap();
        assert_eq!(result, json!({"a": 5}));
    }

    #[test]
    fn test_later_leaf_replaces_node() {
        let result = merged(vec![json!({"a": {"b": 1}}), json!({"a": 3})]).unwrap();
        assert_eq!(result, json!({"a": 3}));
    }

    #[test]
    fn test_three_way_node_leaf_node() {
        // The leaf from the second source replaces the node; the third source then
        // cannot refine it.
        let result = merged(vec![json!({"a": {"b": 1}}), json!({"a": 1}), json!({"a.c": 2})]);
        assert!(matches!(result, Err(ModpropsError::ConflictingMergeTypes { .. })));
    }

    #[test]
    fn test_three_way_node_node_leaf() {
        let result =
            merged(vec![json!({"a": {"b": 1}}), json!({"a.c": 2}), json!({"a": "x"})]).unwrap();
        assert_eq!(result, json!({"a": "x"}));
    }

    #[test]
    fn test_sentinel_node_is_spliced_upwards() {
        let result = merged(vec![json!({"project": {"name": "demo"}, "project.root": {"name": "root"}})])
            .unwrap();
        assert_eq!(result, json!({"project": {"name": "demo", "root": {"name": "root"}}}));
    }

    #[test]
    fn test_sentinel_node_merges_into_existing_node() {
        let result = merged(vec![
            json!({"project": {"group": "com.example"}}),
            json!({"project": {"name": "demo"}, "project.root": {"name": "root"}}),
        ])
        .unwrap();
        assert_eq!(
            result,
            json!({"project": {"group": "com.example", "name": "demo", "root": {"name": "root"}}})
        );
    }

    #[test]
    fn test_guard_key_is_skipped_at_every_level() {
        let result = merged(vec![json!({
            "properties": {"loop": 1},
            "project": {"name": "demo", "properties": {"loop": 2}}
        })])
        .unwrap();
        assert_eq!(result, json!({"project": {"name": "demo"}}));
    }

    #[test]
    fn test_blank_and_empty_values_removed() {
        let result = merged(vec![json!({"a": "  ", "b": {}, "c": {"d": ""}, "e": 0})]).unwrap();
        assert_eq!(result, json!({"e": 0}));
    }

    #[test]
    fn test_nested_camel_case_is_normalized() {
        let result = merged(vec![json!({"fabric": {"loaderVersion": "0.16"}})]).unwrap();
        assert_eq!(result, json!({"fabric": {"loader": {"version": "0.16"}}}));
    }

    #[test]
    fn test_deferred_values_are_not_forced() {
        let deferred = DeferredValue::from_fn(|| Ok("[21,)".to_string()));
        let mut source = PropertyMap::new();
        source.insert("java.range.neoforge".to_string(), deferred.clone().into());
        source.insert("java.version".to_string(), "21".into());

        let tree = merge_sources([source]).unwrap();
        assert!(!deferred.is_resolved());
        assert_eq!(tree.get("java.range.neoforge"), Some(&PropertyValue::Deferred(deferred.clone())));

        assert_eq!(tree.text("java.range.neoforge").unwrap().as_deref(), Some("[21,)"));
        assert!(deferred.is_resolved());
    }

    #[test]
    fn test_merge_maps_right_wins_on_clash() {
        let mut left = src(json!({"a": {"b": 1, "c": 2}, "d": {"e": 1}}));
        let right = src(json!({"a": {"b": {"x": 1}}, "d": 4}));
        merge_maps(&mut left, right);
        assert_eq!(
            crate::properties::value::map_to_json(&left).unwrap(),
            json!({"a": {"b": {"x": 1}, "c": 2}, "d": 4})
        );
    }

    #[test]
    fn test_failed_source_leaves_result_untouched() {
        let mut merger = PropertyTreeMerger::new();
        merger.add_source("base", src(json!({"b": {"x": 1}, "z": 1}))).unwrap();

        // `b` merges before `z.c` conflicts with the scalar at `z`.
        let error = merger
            .add_source("bad", src(json!({"b": {"y": 2}, "z.c": 3})))
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(error, ModpropsError::ConflictingMergeTypes { .. }));

        assert_eq!(merger.source_count(), 1);
        assert_eq!(merger.finish().to_json().unwrap(), json!({"b": {"x": 1}, "z": 1}));
    }

    #[test]
    fn test_merger_counts_sources() {
        let mut merger = PropertyTreeMerger::new();
        merger.add_source("one", src(json!({"a": 1}))).unwrap();
        merger.add_source("two", src(json!({"b": 2}))).unwrap();
        assert_eq!(merger.source_count(), 2);
        assert_eq!(merger.finish().to_json().unwrap(), json!({"a": 1, "b": 2}));
    }
}
