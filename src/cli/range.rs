//! Translate a version constraint from the command line.
//!
//! ```bash
//! modprops range "[1.20,1.21)" --dialect comparator   # >=1.20 <1.21
//! modprops range 1.21 --additional 1.21.1             # [1.21],[1.21.1]
//! ```

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::core::ModpropsError;
use crate::version::{ComparatorListStyle, RangeDialect, RangeRenderer, VersionSpec};

/// Command to translate one version constraint.
#[derive(Args, Debug)]
pub struct RangeCommand {
    /// Version constraint: exact version, `1.20.+`, one interval or `+`
    #[arg(value_name = "CONSTRAINT")]
    pub constraint: String,

    /// Dialect to render
    #[arg(short, long, value_enum, default_value = "interval")]
    pub dialect: RangeDialect,

    /// Further exact versions; turns the constraint into a set of exact versions
    #[arg(short, long, value_name = "VERSION")]
    pub additional: Vec<String>,

    /// Joining style of comparator-dialect version sets
    #[arg(long, value_enum, default_value = "quoted")]
    pub list_style: ComparatorListStyle,
}

impl RangeCommand {
    /// Print the translated range.
    ///
    /// # Errors
    ///
    /// Returns the parse error of an unsupported constraint.
    pub fn execute(self) -> Result<()> {
        println!("{}", self.translate()?);
        Ok(())
    }

    /// The translated range.
    ///
    /// # Errors
    ///
    /// Returns the parse error of an unsupported constraint.
    pub fn translate(&self) -> Result<String> {
        let spec = if self.additional.is_empty() {
            VersionSpec::parse(&self.constraint)?
        } else {
            for member in std::iter::once(&self.constraint).chain(&self.additional) {
                ensure_plain_version(member)?;
            }
            VersionSpec::exact_set(&self.constraint, &self.additional)
        };
        debug!("Parsed '{}' as {spec}", self.constraint);

        let rendered = RangeRenderer::new(self.dialect)
            .with_list_style(self.list_style)
            .render(&spec)
            .with_context(|| format!("Failed to translate '{}'", self.constraint))?;
        Ok(rendered)
    }
}

/// Members of an exact version set must be single versions, not ranges.
fn ensure_plain_version(version: &str) -> Result<()> {
    match VersionSpec::parse(version)? {
        VersionSpec::Range(bounds) if bounds.is_point() && bounds.min == version => Ok(()),
        _ => Err(ModpropsError::InvalidRangeSyntax {
            constraint: version.to_string(),
            reason: "a set of exact versions only accepts plain versions".to_string(),
        }
        .into()),
    }
}
