//! modprops - version-range translation and hierarchical property merging for
//! mod build tooling.
//!
//! Mod loaders disagree on how a dependency range is written: NeoForge metadata
//! uses Maven intervals (`[1.20,1.21)`), Fabric metadata uses npm comparators
//! (`>=1.20 <1.21`). Build scripts also collect properties from several places
//! (flat `gradle.properties` keys, camel-case names, nested tables) and need them
//! as one tree when resource files are templated.
//!
//! # Architecture
//!
//! - [`version`] parses constraints into bounds and renders them in either dialect
//! - [`properties`] normalizes keys and merges property sources into a tree with
//!   lazily computed values
//! - [`config`] loads `modprops.toml` and its `gradle.properties` defaults
//! - [`templating`] builds the interpolation tree and renders resources with Tera
//! - [`cli`] is the `modprops` command-line interface
//! - [`core`] holds the error type and user-facing error reporting
//!
//! # Example
//!
//! ```rust
//! use modprops::properties::{merge_sources, source};
//! use modprops::version::{RangeDialect, translate};
//! use serde_json::json;
//!
//! assert_eq!(translate("1.20.+", RangeDialect::Comparator)?, ">=1.20 <1.21");
//!
//! let tree = merge_sources([
//!     source::from_json(json!({ "minecraftVersion": "1.20.1" })),
//!     source::from_json(json!({ "minecraft": { "loader": "neoforge" } })),
//! ])?;
//! assert_eq!(tree.text("minecraft.version")?.as_deref(), Some("1.20.1"));
//! assert_eq!(tree.text("minecraft.loader")?.as_deref(), Some("neoforge"));
//! # Ok::<(), modprops::core::ModpropsError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod properties;
pub mod templating;
pub mod version;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
