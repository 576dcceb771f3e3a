//! External dependencies and the range notations derived from them.
//!
//! Every external dependency contributes two template properties, one per range
//! dialect, keyed by a camel-cased module name:
//!
//! ```text
//! net.fabricmc:fabric-loader:[0.15,)
//!   dependenciesNetFabricmcFabricLoaderNpm   = ">=0.15"
//!   dependenciesNetFabricmcFabricLoaderMaven = "[0.15,)"
//! ```
//!
//! After key normalization these land at `dependencies.net.fabricmc.fabric.loader.npm`
//! and `dependencies.net.fabricmc.fabric.loader.maven`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use super::{RangeRenderer, VersionSpec};
use crate::core::{ModpropsError, Result};

/// An external module dependency and its version terms.
///
/// `version` is the plain version notation. The other three mirror rich version
/// constraints; the first non-blank one is used when `version` is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDependency {
    /// Group / organisation, e.g. `net.fabricmc`
    #[serde(default)]
    pub group: Option<String>,
    /// Artifact name, e.g. `fabric-loader`
    pub name: String,
    /// Plain version or range
    #[serde(default)]
    pub version: Option<String>,
    /// Required version constraint
    #[serde(default)]
    pub required: Option<String>,
    /// Strict version constraint
    #[serde(default)]
    pub strict: Option<String>,
    /// Preferred version constraint
    #[serde(default)]
    pub preferred: Option<String>,
}

impl ExternalDependency {
    /// Dependency with a plain version.
    pub fn new(group: Option<&str>, name: &str, version: &str) -> Self {
        Self {
            group: group.map(str::to_string),
            name: name.to_string(),
            version: Some(version.to_string()),
            ..Self::default()
        }
    }

    /// `group:name` for messages.
    #[must_use]
    pub fn coordinates(&self) -> String {
        match &self.group {
            Some(group) => format!("{group}:{}", self.name),
            None => self.name.clone(),
        }
    }

    /// The version term to translate.
    ///
    /// A present `version` always wins, even when blank; otherwise the first
    /// non-blank of `required`, `strict` and `preferred`.
    ///
    /// # Errors
    ///
    /// Returns [`ModpropsError::MissingVersionConstraint`] when none is set.
    pub fn version_term(&self) -> Result<&str> {
        if let Some(version) = &self.version {
            return Ok(version.as_str());
        }

        [&self.required, &self.strict, &self.preferred]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|term| !term.trim().is_empty())
            .ok_or_else(|| ModpropsError::MissingVersionConstraint {
                dependency: self.coordinates(),
            })
    }

    /// Render the dependency's version term in the renderer's dialect.
    ///
    /// # Errors
    ///
    /// Returns the version-term or range-parsing error of this dependency.
    pub fn render_range(&self, renderer: &RangeRenderer) -> Result<String> {
        renderer.render(&VersionSpec::parse(self.version_term()?)?)
    }

    /// Camel-cased module name used in notation keys.
    ///
    /// The lower-cased group comes first, with its dot-segments joined in camel
    /// case when there is more than one. The artifact name follows with its
    /// dash-separated parts joined in camel case and its first letter capitalized.
    /// Any `-` left over becomes `_`.
    ///
    /// ```rust
    /// use modprops::version::ExternalDependency;
    ///
    /// let dep = ExternalDependency::new(Some("net.fabricmc"), "fabric-loader", "0.15.11");
    /// assert_eq!(dep.full_module_name(), "netFabricmcFabricLoader");
    /// ```
    #[must_use]
    pub fn full_module_name(&self) -> String {
        let group = self
            .group
            .as_deref()
            .map(|g| join_camel_case(&g.to_lowercase(), '.'))
            .unwrap_or_default();

        format!("{group}{}", capitalize(&join_camel_case(&self.name, '-'))).replace('-', "_")
    }

    /// The `(key, range)` notation entries for both dialects.
    ///
    /// # Errors
    ///
    /// Returns the version-term or range-parsing error of this dependency.
    pub fn notations(&self) -> Result<Vec<(String, String)>> {
        let base = format!("dependencies{}", capitalize(&self.full_module_name()));
        Ok(vec![
            (format!("{base}Npm"), self.render_range(&RangeRenderer::comparator())?),
            (format!("{base}Maven"), self.render_range(&RangeRenderer::interval())?),
        ])
    }
}

/// Collect the notations of all dependencies sharing one artifact name.
///
/// Identical notations collapse. If two dependencies produce different ranges for
/// the same key, the later one wins and a warning is logged.
///
/// # Errors
///
/// Returns the first version-term or range-parsing error.
pub fn notations_for<'a>(
    dependencies: impl IntoIterator<Item = &'a ExternalDependency>,
) -> Result<BTreeMap<String, String>> {
    let mut notations = BTreeMap::new();
    for dependency in dependencies {
        for (key, range) in dependency.notations()? {
            if let Some(previous) = notations.insert(key.clone(), range.clone())
                && previous != range
            {
                warn!(
                    "Dependency notation '{}' resolved to both '{}' and '{}'; using '{}'",
                    key, previous, range, range
                );
            }
        }
    }
    Ok(notations)
}

/// Group dependencies by artifact name, keeping declaration order inside a group.
pub fn group_by_name(
    dependencies: &[ExternalDependency],
) -> BTreeMap<&str, Vec<&ExternalDependency>> {
    let mut groups: BTreeMap<&str, Vec<&ExternalDependency>> = BTreeMap::new();
    for dependency in dependencies {
        groups.entry(dependency.name.as_str()).or_default().push(dependency);
    }
    groups
}

fn join_camel_case(value: &str, separator: char) -> String {
    let mut parts = value.split(separator);
    let first = parts.next().unwrap_or_default().to_string();
    parts.fold(first, |acc, part| acc + &capitalize(part))
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
