//! File parsing helpers for configuration loading.
//!
//! Both helpers read through `tokio::fs` and attach the file path to every error,
//! so a failure reads like:
//!
//! ```text
//! Failed to parse config file: /path/to/modprops.toml
//! Caused by:
//!     invalid type: integer `1`, expected a string
//! ```

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

use crate::properties::source::parse_properties;

/// Parse a TOML file into any deserializable type.
///
/// # Examples
///
/// ```rust,no_run
/// use modprops::config::parse_config;
/// use serde::Deserialize;
/// use std::path::Path;
///
/// #[derive(Deserialize)]
/// struct Config {
///     name: String,
/// }
///
/// # async fn example() -> anyhow::Result<()> {
/// let config: Config = parse_config(Path::new("modprops.toml")).await?;
/// println!("Building {}", config.name);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not match `T`.
pub async fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

/// Read a Java `.properties` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or has a malformed escape.
pub async fn read_properties_file(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read properties file: {}", path.display()))?;

    let entries = parse_properties(&content, &path.display().to_string())?;
    tracing::debug!("Read {} entries from {}", entries.len(), path.display());
    Ok(entries)
}
