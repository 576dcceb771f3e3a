//! Version-range translation between the interval and comparator dialects.
//!
//! Build tooling for game mods has to state the same dependency range twice: once
//! in Maven/Gradle interval syntax (`[1.20,1.21)`) for one loader's metadata, and
//! once in npm-style comparator syntax (`>=1.20 <1.21`) for another's. This module
//! parses one constraint and renders it in either dialect.
//!
//! # Components
//!
//! - [`Bounds`] - parsed minimum, optional maximum and maximum inclusivity
//! - [`VersionSpec`] - wildcard, exact set, or a single range
//! - [`RangeRenderer`] - renders a [`VersionSpec`] in a [`RangeDialect`]
//! - [`ExternalDependency`] - a dependency's version terms and its notation keys
//!
//! # Constraint Syntax Reference
//!
//! | Syntax | Meaning | Interval | Comparator |
//! |--------|---------|----------|------------|
//! | `+` | anything | `+` | `*` |
//! | `1.20.1` | exactly `1.20.1` | `[1.20.1]` | `=1.20.1` |
//! | `1.20.+` | `1.20` up to, excluding, `1.21` | `[1.20,1.21)` | `>=1.20 <1.21` |
//! | `[1.20,)` | `1.20` or later | `[1.20,)` | `>=1.20` |
//! | `[1.20,1.21]` | `1.20` to `1.21` inclusive | `[1.20,1.21]` | `>=1.20 <=1.21` |
//!
//! Only one continuous interval is supported per constraint. Versions are handled
//! as opaque strings; no semantic ordering is applied.
//!
//! # Examples
//!
//! ```rust
//! use modprops::version::{RangeDialect, RangeRenderer, VersionSpec, translate};
//!
//! assert_eq!(translate("1.20.+", RangeDialect::Comparator)?, ">=1.20 <1.21");
//!
//! let supported = VersionSpec::exact_set("1.21", ["1.21.1"]);
//! assert_eq!(RangeRenderer::interval().render(&supported)?, "[1.21],[1.21.1]");
//! # Ok::<(), modprops::core::ModpropsError>(())
//! ```
//!
//! # Concurrency
//!
//! Everything here is a pure function of its input. The only shared state is the
//! compiled interval pattern, which is immutable after first use.

pub mod bounds;
pub mod dependency;
pub mod render;
pub mod spec;

pub use bounds::Bounds;
pub use dependency::{ExternalDependency, group_by_name, notations_for};
pub use render::{ComparatorListStyle, RangeDialect, RangeRenderer, translate};
pub use spec::VersionSpec;
