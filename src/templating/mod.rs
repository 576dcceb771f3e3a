//! Resource templating for mod builds.
//!
//! Loader metadata files (`fabric.mod.json`, `neoforge.mods.toml`, `pack.mcmeta`)
//! need the same facts in different notations: the supported game versions as an
//! interval list for one loader and as comparator clauses for the other, the Java
//! floor, and a range for every dependency. This module builds those facts into
//! one interpolation tree and renders resource files against it with Tera.
//!
//! # Template Context
//!
//! | Path | Example |
//! |------|---------|
//! | `version` | `1.0.0` |
//! | `name` | `Demo` |
//! | `project.package` | `com.example.neoforge` |
//! | `project.root.*` | root project and `gradle.properties` entries |
//! | `project.*` | module properties |
//! | `minecraft.version` | `1.21` |
//! | `minecraft.range.neoforge` | `[1.21],[1.21.1]` |
//! | `minecraft.range.fabric` | `"=1.21", "=1.21.1"` |
//! | `loader.version` | `21.0.167` |
//! | `java.version` | `21` |
//! | `java.range.neoforge` | `[21,)` |
//! | `java.range.fabric` | `=21` |
//! | `dependencies.<group>.<name>.maven` | `[19.0,20.0)` |
//! | `dependencies.<group>.<name>.npm` | `>=19.0 <20.0` |
//!
//! # Example Template
//!
//! ```text
//! [[dependencies.{{ project.root.mod.id }}]]
//! modId = "minecraft"
//! versionRange = "{{ minecraft.range.neoforge }}"
//! ```
//!
//! # Excluded Files
//!
//! Files matching [`DEFAULT_EXCLUDES`] (images, jars, access wideners, configs and
//! anything under a `lang` directory) are copied verbatim. Extra globs can be
//! added per run.

mod context;
mod renderer;
mod resources;

pub use context::InterpolationContextBuilder;
pub use renderer::TemplateRenderer;
pub use resources::{DEFAULT_EXCLUDES, ExpansionSummary, ResourceExpander};
