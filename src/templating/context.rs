//! Building the interpolation tree handed to resource templates.
//!
//! The tree is the fold of four kinds of source, in this order:
//!
//! 1. **Base**: project identity, game version and its supported ranges, loader
//!    and Java versions
//! 2. **Platform**: loader-specific range notations (Fabric only)
//! 3. **Project**: `project.root.*` from the root project properties and the
//!    properties file, `project.*` from the module properties
//! 4. **Dependencies**: one source per artifact name with its range notations
//!
//! Later sources win on conflicting leaves. Every range in the base and
//! platform sources is a [`DeferredValue`]: it is only rendered when a template
//! asks for its text.

use tracing::debug;

use crate::config::{BuildConfig, PlatformKind};
use crate::core::Result;
use crate::properties::source::{from_properties, from_toml_table};
use crate::properties::{
    DeferredValue, PropertyMap, PropertyTree, PropertyTreeMerger, PropertyValue, process_into,
};
use crate::version::{
    ComparatorListStyle, ExternalDependency, RangeDialect, RangeRenderer, VersionSpec,
    group_by_name, notations_for, translate,
};

/// Builds the interpolation tree of one module from its [`BuildConfig`].
///
/// # Examples
///
/// ```rust
/// use modprops::config::BuildConfig;
/// use modprops::templating::InterpolationContextBuilder;
///
/// let config: BuildConfig = toml::from_str(r#"
///     [project]
///     name = "demo"
///     group = "com.example"
///     version = "1.0.0"
///
///     [platform.minecraft]
///     version = "1.21"
///     additional_versions = ["1.21.1"]
///
///     [platform.java]
///     version = 21
/// "#)?;
///
/// let tree = InterpolationContextBuilder::new(&config).build()?;
/// assert_eq!(tree.text("project.package")?.as_deref(), Some("com.example.demo"));
/// assert_eq!(tree.text("minecraft.range.neoforge")?.as_deref(), Some("[1.21],[1.21.1]"));
/// assert_eq!(tree.text("java.range.fabric")?.as_deref(), Some("=21"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct InterpolationContextBuilder<'a> {
    config: &'a BuildConfig,
}

impl<'a> InterpolationContextBuilder<'a> {
    #[must_use]
    pub const fn new(config: &'a BuildConfig) -> Self {
        Self {
            config,
        }
    }

    /// Fold every source into the interpolation tree.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for missing versions, a range error for a
    /// dependency, or [`ConflictingMergeTypes`](crate::core::ModpropsError::ConflictingMergeTypes).
    pub fn build(&self) -> Result<PropertyTree> {
        let mut merger = PropertyTreeMerger::new();
        merger.add_source("base", self.base_source()?)?;
        merger.add_source("platform", self.platform_source())?;
        merger.add_source("project", self.project_source()?)?;

        let dependencies = self.dependencies();
        for (name, group) in group_by_name(&dependencies) {
            let notations = notations_for(group)?;
            let source = notations.into_iter().map(|(k, v)| (k, PropertyValue::from(v))).collect();
            merger.add_source(&format!("dependency {name}"), source)?;
        }

        debug!(
            "Built interpolation context for '{}' from {} sources",
            self.config.project.module_name(),
            merger.source_count()
        );
        Ok(merger.finish())
    }

    /// Project identity plus game, loader and Java versions and ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`](crate::core::ModpropsError::ConfigError) when the
    /// Minecraft, Java or loader version is unset.
    pub fn base_source(&self) -> Result<PropertyMap> {
        let project = &self.config.project;
        let minecraft_version = self.config.minecraft_version()?.to_string();
        let java_version = self.config.java_version()?;
        let loader_version = self.config.loader_version()?.to_string();

        let package = format!(
            "{}.{}",
            project.group.as_deref().unwrap_or_default(),
            project.module_name().to_lowercase()
        );

        let supported = VersionSpec::exact_set(
            &minecraft_version,
            &self.config.platform.minecraft.additional_versions,
        );
        let minecraft_range = node([
            ("neoforge", deferred_render(RangeRenderer::interval(), supported.clone())),
            (
                "fabric",
                deferred_render(
                    RangeRenderer::comparator().with_list_style(ComparatorListStyle::Quoted),
                    supported,
                ),
            ),
        ]);

        let java_floor = format!("[{java_version},)");
        let java_exact = java_version.to_string();
        let java_range = node([
            ("neoforge", deferred_translate(java_floor, RangeDialect::Interval)),
            ("fabric", deferred_translate(java_exact, RangeDialect::Comparator)),
        ]);

        Ok(PropertyMap::from([
            ("version".to_string(), project.version.clone().into()),
            ("name".to_string(), project.name.clone().into()),
            ("project".to_string(), node([("package", package.into())])),
            (
                "minecraft".to_string(),
                node([("version", minecraft_version.into()), ("range", minecraft_range)]),
            ),
            ("loader".to_string(), node([("version", loader_version.into())])),
            (
                "java".to_string(),
                node([("version", i64::from(java_version).into()), ("range", java_range)]),
            ),
        ]))
    }

    /// Loader-specific notations. Only Fabric has any.
    #[must_use]
    pub fn platform_source(&self) -> PropertyMap {
        let mut source = PropertyMap::new();
        if self.config.platform.kind != PlatformKind::Fabric {
            return source;
        }

        let fabric = &self.config.platform.fabric;
        for (key, version) in [
            ("dependenciesFabricLoaderNpm", &fabric.loader_version),
            ("dependenciesFabricApiNpm", &fabric.api_version),
        ] {
            if let Some(version) = version {
                source.insert(key.to_string(), deferred_translate(version.clone(), RangeDialect::Comparator));
            }
        }
        source
    }

    /// `project.root` and `project` properties.
    ///
    /// Root properties are the properties file entries overlaid with
    /// `[root_properties]`. Each side is normalized on its own first.
    ///
    /// # Errors
    ///
    /// Returns [`ConflictingMergeTypes`](crate::core::ModpropsError::ConflictingMergeTypes)
    /// from normalizing either side.
    pub fn project_source(&self) -> Result<PropertyMap> {
        let mut root = PropertyMap::new();
        process_into(&mut root, from_properties(self.config.gradle_properties.clone()), "project.root")?;
        process_into(&mut root, from_toml_table(self.config.root_properties.clone()), "project.root")?;

        let mut module = PropertyMap::new();
        process_into(&mut module, from_toml_table(self.config.properties.clone()), "project")?;

        Ok(PropertyMap::from([
            ("project.root".to_string(), PropertyValue::Node(root)),
            ("project".to_string(), PropertyValue::Node(module)),
        ]))
    }

    /// Configured dependencies plus those the platform adds implicitly.
    ///
    /// Fabric modules always depend on the Fabric loader and, when its version is
    /// set, the Fabric API built for `api_minecraft_version`.
    #[must_use]
    pub fn dependencies(&self) -> Vec<ExternalDependency> {
        let mut dependencies = self.config.dependencies.clone();
        if self.config.platform.kind != PlatformKind::Fabric {
            return dependencies;
        }

        let fabric = &self.config.platform.fabric;
        if let Some(loader) = &fabric.loader_version {
            dependencies.push(ExternalDependency::new(Some("net.fabricmc"), "fabric-loader", loader));
        }
        let api_minecraft = fabric
            .api_minecraft_version
            .as_deref()
            .or(self.config.platform.minecraft.version.as_deref());
        if let (Some(api), Some(minecraft)) = (&fabric.api_version, api_minecraft) {
            dependencies.push(ExternalDependency::new(
                Some("net.fabricmc.fabric-api"),
                "fabric-api",
                &format!("{api}+{minecraft}"),
            ));
        }
        dependencies
    }
}

fn node<const N: usize>(entries: [(&str, PropertyValue); N]) -> PropertyValue {
    PropertyValue::Node(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

fn deferred_render(renderer: RangeRenderer, spec: VersionSpec) -> PropertyValue {
    DeferredValue::from_fn(move || renderer.render(&spec)).into()
}

fn deferred_translate(constraint: String, dialect: RangeDialect) -> PropertyValue {
    DeferredValue::from_fn(move || translate(&constraint, dialect)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn config(toml_text: &str) -> BuildConfig {
        toml::from_str(toml_text).unwrap()
    }

    const NEOFORGE: &str = r#"
[project]
name = "Demo"
module = "NeoForge"
group = "com.example"
version = "1.0.0"

[platform]
kind = "neoforge"

[platform.minecraft]
version = "1.21"
additional_versions = ["1.21.1", ""]

[platform.java]
version = 21

[platform.neoforge]
version = "21.0.167"

[root_properties]
modId = "demo"

[properties]
display_name = "Demo Mod"

[[dependencies]]
group = "mezz.jei"
name = "jei"
version = "[19.0,20.0)"
"#;

    #[test]
    fn test_neoforge_context() {
        let tree = InterpolationContextBuilder::new(&config(NEOFORGE)).build().unwrap();
        let json = tree.to_json().unwrap();

        assert_eq!(json["version"], json!("1.0.0"));
        assert_eq!(json["name"], json!("Demo"));
        assert_eq!(json["project"]["package"], json!("com.example.neoforge"));
        assert_eq!(json["project"]["root"]["mod"]["id"], json!("demo"));
        assert_eq!(json["project"]["display_name"], json!("Demo Mod"));
        assert_eq!(json["minecraft"]["version"], json!("1.21"));
        assert_eq!(json["minecraft"]["range"]["neoforge"], json!("[1.21],[1.21.1]"));
        assert_eq!(json["minecraft"]["range"]["fabric"], json!("\"=1.21\", \"=1.21.1\""));
        assert_eq!(json["loader"]["version"], json!("21.0.167"));
        assert_eq!(json["java"]["version"], json!(21));
        assert_eq!(json["java"]["range"]["neoforge"], json!("[21,)"));
        assert_eq!(json["java"]["range"]["fabric"], json!("=21"));
        assert_eq!(json["dependencies"]["mezz"]["jei"]["jei"]["maven"], json!("[19.0,20.0)"));
        assert_eq!(json["dependencies"]["mezz"]["jei"]["jei"]["npm"], json!(">=19.0 <20.0"));
    }

    #[test]
    fn test_ranges_stay_deferred_until_requested() {
        let tree = InterpolationContextBuilder::new(&config(NEOFORGE)).build().unwrap();
        match tree.get("java.range.neoforge") {
            Some(PropertyValue::Deferred(value)) => assert!(!value.is_resolved()),
            other => panic!("expected deferred range, got {other:?}"),
        }
    }

    #[test]
    fn test_fabric_platform_notations() {
        let mut config = config(NEOFORGE);
        config.platform.kind = PlatformKind::Fabric;
        config.platform.fabric.loader_version = Some("0.16.0".to_string());
        config.platform.fabric.api_version = Some("0.100.0".to_string());

        let tree = InterpolationContextBuilder::new(&config).build().unwrap();
        assert_eq!(tree.text("loader.version").unwrap().as_deref(), Some("0.16.0"));
        assert_eq!(tree.text("dependencies.fabric.loader.npm").unwrap().as_deref(), Some("=0.16.0"));
        assert_eq!(tree.text("dependencies.fabric.api.npm").unwrap().as_deref(), Some("=0.100.0"));
        assert_eq!(
            tree.text("dependencies.net.fabricmc.fabric.loader.maven").unwrap().as_deref(),
            Some("[0.16.0]")
        );
        assert_eq!(
            tree.text("dependencies.net.fabricmc.fabric_api.fabric.api.npm").unwrap().as_deref(),
            Some("=0.100.0+1.21")
        );
    }

    #[test]
    fn test_common_platform_uses_minecraft_as_loader() {
        let mut config = config(NEOFORGE);
        config.platform.kind = PlatformKind::Common;
        let tree = InterpolationContextBuilder::new(&config).build().unwrap();
        assert_eq!(tree.text("loader.version").unwrap().as_deref(), Some("1.21"));
        assert!(InterpolationContextBuilder::new(&config).platform_source().is_empty());
    }

    #[test]
    fn test_gradle_properties_become_root_properties() {
        let mut config = config(NEOFORGE);
        config.gradle_properties = BTreeMap::from([
            ("mod_id".to_string(), "from_gradle".to_string()),
            ("modId".to_string(), "overridden".to_string()),
        ]);
        let tree = InterpolationContextBuilder::new(&config).build().unwrap();
        assert_eq!(tree.text("project.root.mod_id").unwrap().as_deref(), Some("from_gradle"));
        // `[root_properties]` wins over the properties file.
        assert_eq!(tree.text("project.root.mod.id").unwrap().as_deref(), Some("demo"));
    }

    #[test]
    fn test_missing_version_constraint_fails() {
        let mut config = config(NEOFORGE);
        config.dependencies.push(ExternalDependency {
            name: "broken".to_string(),
            ..ExternalDependency::default()
        });
        assert!(InterpolationContextBuilder::new(&config).build().is_err());
    }

    #[test]
    fn test_missing_minecraft_version_fails() {
        let mut config = config(NEOFORGE);
        config.platform.minecraft.version = None;
        assert!(InterpolationContextBuilder::new(&config).base_source().is_err());
    }
}
