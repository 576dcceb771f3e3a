//! Test fixtures for creating sample project files
//!
//! Each fixture carries its content and writes itself into a directory, usually
//! a `tempfile::TempDir`.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_CONFIG_FILE;

/// Test fixture for creating sample modprops.toml files
#[derive(Clone, Debug)]
pub struct ConfigFixture {
    pub content: String,
    pub name: String,
}

impl ConfigFixture {
    /// NeoForge module whose versions come from `gradle.properties`
    pub fn neoforge() -> Self {
        Self {
            name: "neoforge".to_string(),
            content: r#"
[project]
name = "demo"
module = "NeoForge"
group = "com.example"
version = "1.0.0"

[platform]
kind = "neoforge"
properties_file = "gradle.properties"

[root_properties]
modId = "demo"

[properties]
display_name = "Demo Mod"

[[dependencies]]
group = "mezz.jei"
name = "jei"
version = "[19.0,20.0)"
"#
            .trim()
            .to_string(),
        }
    }

    /// Fabric module with every version inline
    pub fn fabric() -> Self {
        Self {
            name: "fabric".to_string(),
            content: r#"
[project]
name = "demo"
module = "Fabric"
group = "com.example"
version = "1.0.0"

[platform]
kind = "fabric"

[platform.minecraft]
version = "1.21"
additional_versions = ["1.21.1"]

[platform.java]
version = 21

[platform.fabric]
loader_version = "0.16.0"
api_version = "0.100.0"
"#
            .trim()
            .to_string(),
        }
    }

    /// Common module without a properties file
    pub fn common() -> Self {
        Self {
            name: "common".to_string(),
            content: r#"
[project]
name = "demo"
group = "com.example"
version = "1.0.0"

[platform.minecraft]
version = "1.21"

[platform.java]
version = 21
"#
            .trim()
            .to_string(),
        }
    }

    /// Module whose dependency has no version term
    pub fn missing_version() -> Self {
        let mut fixture = Self::common();
        fixture.name = "missing_version".to_string();
        fixture.content.push_str("\n\n[[dependencies]]\ngroup = \"mezz.jei\"\nname = \"jei\"\n");
        fixture
    }

    /// Configuration with invalid TOML syntax
    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid_syntax".to_string(),
            content: "[project\nname = \"demo\"".to_string(),
        }
    }

    /// Write as `modprops.toml` into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Test fixture for creating sample gradle.properties files
#[derive(Clone, Debug)]
pub struct PropertiesFixture {
    pub content: String,
}

impl PropertiesFixture {
    /// Game, Java and loader versions plus one free-form entry
    pub fn basic() -> Self {
        Self {
            content: r"
# Versions
minecraft.version=1.21
minecraft.additionalVersions=1.21.1
java.version=21
neoforge.version=21.0.167
fabric.loader.version=0.16.0
mod_author = Example \
    Team
"
            .trim()
            .to_string(),
        }
    }

    /// Write as `gradle.properties` into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join("gradle.properties");
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Test fixture for creating resource template files
#[derive(Clone, Debug)]
pub struct TemplateFixture {
    pub path: String,
    pub content: String,
}

impl TemplateFixture {
    /// `META-INF/neoforge.mods.toml` using the NeoForge ranges
    pub fn neoforge_mods_toml() -> Self {
        Self::simple(
            "META-INF/neoforge.mods.toml",
            r#"modId = "{{ project.root.mod.id }}"
version = "{{ version }}"
displayName = "{{ project.display_name }}"

[[dependencies.{{ project.root.mod.id }}]]
modId = "minecraft"
versionRange = "{{ minecraft.range.neoforge }}"

[[dependencies.{{ project.root.mod.id }}]]
modId = "jei"
versionRange = "{{ dependencies.mezz.jei.jei.maven }}"
"#,
        )
    }

    /// `fabric.mod.json` using the Fabric ranges
    pub fn fabric_mod_json() -> Self {
        Self::simple(
            "fabric.mod.json",
            r#"{
  "version": "{{ version }}",
  "depends": {
    "fabricloader": "{{ dependencies.fabric.loader.npm }}",
    "minecraft": [{{ minecraft.range.fabric }}],
    "java": "{{ java.range.fabric }}"
  }
}
"#,
        )
    }

    /// Template with arbitrary content
    pub fn simple(path: &str, content: &str) -> Self {
        Self {
            path: path.to_string(),
            content: content.to_string(),
        }
    }

    /// Write under `dir`, creating parent directories.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
