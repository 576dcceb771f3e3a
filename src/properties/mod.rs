//! Hierarchical property merging.
//!
//! Template variables come from several places: the build configuration, the
//! platform's defaults, the root and module project properties, and every external
//! dependency. Each source may spell the same path differently:
//!
//! ```text
//! minecraftVersion = "1.21"           # camel case
//! minecraft.version = "1.21"          # dotted path
//! [minecraft] version = "1.21"        # nested table
//! ```
//!
//! This module normalizes the keys and folds the sources, in order, into one
//! [`PropertyTree`] that templates query by dotted path.
//!
//! # Components
//!
//! - [`normalize_key`] - raw key to path segments
//! - [`PropertyValue`] - scalar, deferred or nested node
//! - [`DeferredValue`] - a scalar computed only when text is needed
//! - [`PropertyTreeMerger`] - ordered folding with collision rules
//! - [`PropertyTree`] - dotted-path queries and conversion to text or JSON
//! - [`source`] - sources from TOML, JSON and `.properties` data
//!
//! # Example
//!
//! ```rust
//! use modprops::properties::{merge_sources, source};
//! use serde_json::json;
//!
//! let tree = merge_sources([
//!     source::from_json(json!({ "minecraftVersion": "1.21" })),
//!     source::from_json(json!({ "minecraft": { "version": "1.21.1" }, "java.version": 21 })),
//! ])?;
//!
//! assert_eq!(tree.text("minecraft.version")?.as_deref(), Some("1.21.1"));
//! assert_eq!(tree.text("java.version")?.as_deref(), Some("21"));
//! # Ok::<(), modprops::core::ModpropsError>(())
//! ```
//!
//! # Laziness
//!
//! Deferred values pass through normalization, merging and cleanup untouched.
//! They are only forced by [`PropertyTree::text`], [`PropertyTree::flatten`] and
//! [`PropertyTree::to_json`].

pub mod deferred;
pub mod key;
pub mod merge;
pub mod source;
pub mod tree;
pub mod value;

pub use deferred::DeferredValue;
pub use key::{GUARD_KEY, SENTINEL_KEY, normalize_key};
pub use merge::{PropertyTreeMerger, merge_maps, merge_sources, process_into};
pub use tree::PropertyTree;
pub use value::{PropertyMap, PropertyValue, Scalar};
