//! The build configuration schema and its loading.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use super::parser::{parse_config, read_properties_file};
use crate::core::ModpropsError;
use crate::version::ExternalDependency;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "modprops.toml";

/// The loader a module targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    /// Loader-independent code; the loader version is the Minecraft version
    #[default]
    Common,
    NeoForge,
    Fabric,
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Common => write!(f, "common"),
            Self::NeoForge => write!(f, "neoforge"),
            Self::Fabric => write!(f, "fabric"),
        }
    }
}

/// `[project]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// Root project name
    pub name: String,
    /// Module (sub-project) name; the project name when absent
    pub module: Option<String>,
    /// Maven group of the root project
    pub group: Option<String>,
    /// Module version
    pub version: String,
}

impl ProjectSettings {
    #[must_use]
    pub fn module_name(&self) -> &str {
        self.module.as_deref().unwrap_or(&self.name)
    }
}

/// `[platform.minecraft]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinecraftSettings {
    pub version: Option<String>,
    /// Further game versions the module is known to work with
    pub additional_versions: Vec<String>,
}

/// `[platform.java]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JavaSettings {
    pub version: Option<u32>,
}

/// `[platform.neoforge]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeoForgeSettings {
    pub version: Option<String>,
}

/// `[platform.fabric]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FabricSettings {
    pub loader_version: Option<String>,
    pub api_version: Option<String>,
    /// Game version the Fabric API build targets; the Minecraft version when absent
    pub api_minecraft_version: Option<String>,
}

/// `[platform]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformSettings {
    pub kind: PlatformKind,
    /// A `gradle.properties`-style file, relative to the configuration file
    pub properties_file: Option<PathBuf>,
    pub minecraft: MinecraftSettings,
    pub java: JavaSettings,
    pub neoforge: NeoForgeSettings,
    pub fabric: FabricSettings,
}

/// A whole `modprops.toml`.
///
/// ```toml
/// [project]
/// name = "demo"
/// group = "com.example"
/// version = "1.0.0"
///
/// [platform]
/// kind = "fabric"
/// properties_file = "gradle.properties"
///
/// [platform.minecraft]
/// version = "1.21"
/// additional_versions = ["1.21.1"]
///
/// [properties]
/// mod_id = "demo"
///
/// [[dependencies]]
/// group = "mezz.jei"
/// name = "jei-1.21-fabric"
/// version = "[19.0,)"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub project: ProjectSettings,
    pub platform: PlatformSettings,
    /// Properties of the root project
    pub root_properties: toml::Table,
    /// Properties of the module
    pub properties: toml::Table,
    pub dependencies: Vec<ExternalDependency>,
    /// Entries of `platform.properties_file`, once loaded
    #[serde(skip)]
    pub gradle_properties: BTreeMap<String, String>,
}

impl BuildConfig {
    /// Load a configuration file and the properties file it names.
    ///
    /// Settings left unset in the TOML are filled from the properties file.
    ///
    /// # Errors
    ///
    /// Returns [`ModpropsError::ConfigNotFound`] for a missing file, a parse error
    /// naming the file, or [`ModpropsError::ConfigError`] for an invalid default.
    pub async fn load(path: &Path) -> Result<Self> {
        let exists = fs::try_exists(path)
            .await
            .with_context(|| format!("Failed to access config file: {}", path.display()))?;
        if !exists {
            return Err(ModpropsError::ConfigNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let mut config: Self = parse_config(path).await?;
        debug!("Loaded build configuration from {}", path.display());

        if let Some(relative) = config.platform.properties_file.clone() {
            let properties_path = path.parent().unwrap_or_else(|| Path::new(".")).join(relative);
            let entries = read_properties_file(&properties_path).await?;
            config
                .apply_gradle_defaults(&entries)
                .with_context(|| format!("Invalid defaults in {}", properties_path.display()))?;
            config.gradle_properties = entries;
        }

        Ok(config)
    }

    /// Fill unset platform settings from `gradle.properties` entries.
    ///
    /// | Entry | Setting |
    /// |-------|---------|
    /// | `minecraft.version` | `platform.minecraft.version` |
    /// | `minecraft.additionalVersions` | `platform.minecraft.additional_versions`, comma-separated |
    /// | `java.version` | `platform.java.version` |
    /// | `neoforge.version` | `platform.neoforge.version` |
    /// | `fabric.loader.version` | `platform.fabric.loader_version` |
    /// | `fabric.api.version` | `platform.fabric.api_version` |
    /// | `fabric.api.minecraft.version` | `platform.fabric.api_minecraft_version` |
    ///
    /// # Errors
    ///
    /// Returns [`ModpropsError::ConfigError`] when `java.version` is not a number.
    pub fn apply_gradle_defaults(
        &mut self,
        entries: &BTreeMap<String, String>,
    ) -> crate::core::Result<()> {
        let lookup = |key: &str| {
            entries.get(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
        };
        let fill = |slot: &mut Option<String>, key: &str| {
            if slot.is_none() {
                *slot = lookup(key);
            }
        };

        let platform = &mut self.platform;
        fill(&mut platform.minecraft.version, "minecraft.version");
        fill(&mut platform.neoforge.version, "neoforge.version");
        fill(&mut platform.fabric.loader_version, "fabric.loader.version");
        fill(&mut platform.fabric.api_version, "fabric.api.version");
        fill(&mut platform.fabric.api_minecraft_version, "fabric.api.minecraft.version");

        if platform.minecraft.additional_versions.is_empty()
            && let Some(list) = lookup("minecraft.additionalVersions")
        {
            platform.minecraft.additional_versions =
                list.split(',').map(|v| v.trim().to_string()).collect();
        }

        if platform.java.version.is_none()
            && let Some(java) = lookup("java.version")
        {
            let version = java.parse::<u32>().map_err(|_| ModpropsError::ConfigError {
                message: format!("java.version must be a whole number, found '{java}'"),
            })?;
            platform.java.version = Some(version);
        }

        Ok(())
    }

    /// Game version, required by every platform.
    ///
    /// # Errors
    ///
    /// Returns [`ModpropsError::ConfigError`] when unset.
    pub fn minecraft_version(&self) -> crate::core::Result<&str> {
        self.platform.minecraft.version.as_deref().ok_or_else(|| ModpropsError::ConfigError {
            message: "Minecraft version is not set ([platform.minecraft] version or minecraft.version)"
                .to_string(),
        })
    }

    /// Java language version, required by every platform.
    ///
    /// # Errors
    ///
    /// Returns [`ModpropsError::ConfigError`] when unset.
    pub fn java_version(&self) -> crate::core::Result<u32> {
        self.platform.java.version.ok_or_else(|| ModpropsError::ConfigError {
            message: "Java version is not set ([platform.java] version or java.version)".to_string(),
        })
    }

    /// The version of the mod loader the module builds against.
    ///
    /// # Errors
    ///
    /// Returns [`ModpropsError::ConfigError`] when the platform's loader version is unset.
    pub fn loader_version(&self) -> crate::core::Result<&str> {
        let (value, setting) = match self.platform.kind {
            PlatformKind::Common => return self.minecraft_version(),
            PlatformKind::NeoForge => {
                (self.platform.neoforge.version.as_deref(), "[platform.neoforge] version")
            }
            PlatformKind::Fabric => {
                (self.platform.fabric.loader_version.as_deref(), "[platform.fabric] loader_version")
            }
        };
        value.ok_or_else(|| ModpropsError::ConfigError {
            message: format!("{} loader version is not set ({setting})", self.platform.kind),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const FABRIC_CONFIG: &str = r#"
[project]
name = "demo"
module = "Fabric"
group = "com.example"
version = "1.0.0"

[platform]
kind = "fabric"
properties_file = "gradle.properties"

[platform.minecraft]
version = "1.21"

[root_properties]
mod_id = "demo"

[properties]
description = "A demo"

[[dependencies]]
group = "mezz.jei"
name = "jei"
version = "[19.0,)"
"#;

    #[tokio::test]
    async fn test_load_with_properties_file() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("modprops.toml"), FABRIC_CONFIG).unwrap();
        std::fs::write(
            temp.path().join("gradle.properties"),
            "minecraft.version=1.20.6\nminecraft.additionalVersions=1.21.1, 1.21.2\njava.version=21\nfabric.loader.version=0.16.0\n",
        )
        .unwrap();

        let config = BuildConfig::load(&temp.path().join("modprops.toml")).await.unwrap();

        assert_eq!(config.project.module_name(), "Fabric");
        assert_eq!(config.platform.kind, PlatformKind::Fabric);
        // The TOML value wins over the properties file.
        assert_eq!(config.minecraft_version().unwrap(), "1.21");
        assert_eq!(config.platform.minecraft.additional_versions, vec!["1.21.1", "1.21.2"]);
        assert_eq!(config.java_version().unwrap(), 21);
        assert_eq!(config.loader_version().unwrap(), "0.16.0");
        assert_eq!(config.dependencies.len(), 1);
        assert_eq!(config.gradle_properties["minecraft.version"], "1.20.6");
    }

    #[tokio::test]
    async fn test_missing_config() {
        let temp = tempdir().unwrap();
        let error = BuildConfig::load(&temp.path().join("modprops.toml")).await.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<ModpropsError>(),
            Some(ModpropsError::ConfigNotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_inaccessible_config_is_not_reported_missing() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("plain");
        std::fs::write(&file, "").unwrap();

        // A regular file used as a directory fails with ENOTDIR, not NotFound.
        let error = BuildConfig::load(&file.join("modprops.toml")).await.unwrap_err();
        assert!(error.downcast_ref::<ModpropsError>().is_none(), "{error:?}");
        assert!(error.to_string().contains("Failed to access config file"), "{error}");
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config: BuildConfig = toml::from_str("[project]\nname = \"demo\"\n").unwrap();
        assert_eq!(config.platform.kind, PlatformKind::Common);
        assert_eq!(config.project.module_name(), "demo");
        assert!(config.minecraft_version().is_err());
        assert!(config.java_version().is_err());
    }

    #[test]
    fn test_bad_java_default() {
        let mut config = BuildConfig::default();
        let entries = BTreeMap::from([("java.version".to_string(), "twenty-one".to_string())]);
        assert!(matches!(
            config.apply_gradle_defaults(&entries),
            Err(ModpropsError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_loader_version_per_platform() {
        let mut config = BuildConfig::default();
        config.platform.minecraft.version = Some("1.21".to_string());
        assert_eq!(config.loader_version().unwrap(), "1.21");

        config.platform.kind = PlatformKind::NeoForge;
        assert!(config.loader_version().unwrap_err().to_string().contains("neoforge"));

        config.platform.neoforge.version = Some("21.0.167".to_string());
        assert_eq!(config.loader_version().unwrap(), "21.0.167");
    }
}
