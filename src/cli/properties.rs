//! Print the interpolation tree of a module.
//!
//! The tree is built exactly as `render` builds it, so this is the way to find
//! out which variables a resource template can use.
//!
//! ```bash
//! modprops properties                              # whole tree as JSON
//! modprops properties --format flat                # one `path=value` per line
//! modprops properties --get minecraft.range.neoforge
//! ```

use anyhow::{Context, Result, anyhow};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use tracing::info;

use crate::config::{BuildConfig, DEFAULT_CONFIG_FILE};
use crate::properties::{PropertyTree, PropertyValue};
use crate::templating::InterpolationContextBuilder;

/// Output formats for the `properties` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PropertiesFormat {
    /// Pretty-printed JSON object
    Json,
    /// TOML document
    Toml,
    /// `dotted.path=value` lines in path order
    Flat,
}

/// Command to print the merged interpolation tree.
#[derive(Args, Debug)]
pub struct PropertiesCommand {
    /// Build configuration file
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Output format of the tree
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: PropertiesFormat,

    /// Print only the value at this dotted path
    #[arg(short, long, value_name = "DOTTED.PATH")]
    pub get: Option<String>,
}

impl PropertiesCommand {
    /// Load the configuration and print the tree or the selected value.
    ///
    /// # Errors
    ///
    /// Returns configuration, merge and range errors, or an error listing close
    /// matches when `--get` names no property.
    pub async fn execute(self) -> Result<()> {
        let config = BuildConfig::load(&self.config).await?;
        let tree = InterpolationContextBuilder::new(&config).build()?;
        info!("Merged {} properties", tree.leaf_paths().len());

        println!("{}", self.output(&tree)?);
        Ok(())
    }

    /// Text printed for `tree`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown `--get` path or a failing deferred value.
    pub fn output(&self, tree: &PropertyTree) -> Result<String> {
        match &self.get {
            Some(path) => lookup(tree, path),
            None => format_tree(tree, self.format),
        }
    }
}

fn lookup(tree: &PropertyTree, path: &str) -> Result<String> {
    match tree.get(path) {
        Some(PropertyValue::Node(map)) => {
            let json = crate::properties::value::map_to_json(map)?;
            Ok(serde_json::to_string_pretty(&json)?)
        }
        Some(leaf) => Ok(leaf.to_text()?.unwrap_or_default()),
        None => {
            let suggestions = tree.similar_paths(path);
            if suggestions.is_empty() {
                Err(anyhow!("Property '{path}' not found"))
            } else {
                Err(anyhow!(
                    "Property '{path}' not found, did you mean '{}'?",
                    suggestions.join("', '")
                ))
            }
        }
    }
}

fn format_tree(tree: &PropertyTree, format: PropertiesFormat) -> Result<String> {
    match format {
        PropertiesFormat::Json => Ok(serde_json::to_string_pretty(&tree.to_json()?)?),
        PropertiesFormat::Toml => {
            let json = tree.to_json()?;
            toml::to_string_pretty(&json).context("Failed to serialize properties as TOML")
        }
        PropertiesFormat::Flat => Ok(tree
            .flatten()?
            .into_iter()
            .map(|(path, value)| format!("{path}={value}"))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::{merge_sources, source};
    use serde_json::json;

    fn tree() -> PropertyTree {
        merge_sources([source::from_json(json!({
            "version": "1.0.0",
            "minecraftVersion": "1.21",
            "java": {"version": 21}
        }))])
        .unwrap()
    }

    fn command(format: PropertiesFormat, get: Option<&str>) -> PropertiesCommand {
        PropertiesCommand {
            config: PathBuf::from(DEFAULT_CONFIG_FILE),
            format,
            get: get.map(str::to_string),
        }
    }

    #[test]
    fn test_flat_output() {
        let output = command(PropertiesFormat::Flat, None).output(&tree()).unwrap();
        assert_eq!(output, "java.version=21\nminecraft.version=1.21\nversion=1.0.0");
    }

    #[test]
    fn test_json_and_toml_output() {
        let json = command(PropertiesFormat::Json, None).output(&tree()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["minecraft"]["version"], "1.21");

        let toml_text = command(PropertiesFormat::Toml, None).output(&tree()).unwrap();
        let parsed: toml::Table = toml::from_str(&toml_text).unwrap();
        assert_eq!(parsed["java"]["version"].as_integer(), Some(21));
    }

    #[test]
    fn test_get_leaf_and_node() {
        let leaf = command(PropertiesFormat::Json, Some("minecraft.version")).output(&tree()).unwrap();
        assert_eq!(leaf, "1.21");

        let node = command(PropertiesFormat::Json, Some("java")).output(&tree()).unwrap();
        assert!(node.contains("\"version\": 21"), "{node}");
    }

    #[test]
    fn test_get_unknown_path_suggests() {
        let error =
            command(PropertiesFormat::Json, Some("minecraft.versoin")).output(&tree()).unwrap_err();
        assert!(error.to_string().contains("did you mean 'minecraft.version'"), "{error}");
    }
}
