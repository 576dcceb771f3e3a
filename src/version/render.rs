//! Rendering of [`VersionSpec`] values into the two range dialects.
//!
//! | Input | Interval dialect | Comparator dialect |
//! |-------|------------------|--------------------|
//! | point `1.20` | `[1.20]` | `=1.20` |
//! | unbounded `1.20` | `[1.20,)` | `>=1.20` |
//! | `1.20` to `1.21`, exclusive | `[1.20,1.21)` | `>=1.20 <1.21` |
//! | `1.20` to `1.21`, inclusive | `[1.20,1.21]` | `>=1.20 <=1.21` |
//! | wildcard | `+` | `*` |
//! | exact set `1.20`, `1.21` | `[1.20],[1.21]` | `"=1.20", "=1.21"` or `=1.20 =1.21` |
//!
//! The interval-dialect wildcard is passed through as `+` rather than turned into
//! an interval: consumers of that dialect read `+` as "match anything".

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::{Bounds, VersionSpec};
use crate::core::Result;

/// Target range syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RangeDialect {
    /// Maven/Gradle style: `[`, `]`, `(`, `)`
    Interval,
    /// npm/semver style: `>=`, `<=`, `=`, `*`
    Comparator,
}

/// How a comparator-dialect exact set joins its clauses.
///
/// A given output sink should always be fed with one style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ComparatorListStyle {
    /// `"=1.20", "=1.21"`, ready to be spliced into a JSON array
    #[default]
    Quoted,
    /// `=1.20 =1.21`
    Space,
}

/// Renders version specifications in one configured dialect.
///
/// # Examples
///
/// ```rust
/// use modprops::version::{RangeRenderer, VersionSpec};
///
/// let spec = VersionSpec::parse("1.20.+")?;
/// assert_eq!(RangeRenderer::interval().render(&spec)?, "[1.20,1.21)");
/// assert_eq!(RangeRenderer::comparator().render(&spec)?, ">=1.20 <1.21");
/// # Ok::<(), modprops::core::ModpropsError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRenderer {
    dialect: RangeDialect,
    list_style: ComparatorListStyle,
}

impl RangeRenderer {
    /// Renderer for `dialect` with the default list style.
    #[must_use]
    pub const fn new(dialect: RangeDialect) -> Self {
        Self {
            dialect,
            list_style: ComparatorListStyle::Quoted,
        }
    }

    /// Interval-dialect renderer.
    #[must_use]
    pub const fn interval() -> Self {
        Self::new(RangeDialect::Interval)
    }

    /// Comparator-dialect renderer.
    #[must_use]
    pub const fn comparator() -> Self {
        Self::new(RangeDialect::Comparator)
    }

    /// Use `style` for comparator-dialect exact sets.
    #[must_use]
    pub const fn with_list_style(mut self, style: ComparatorListStyle) -> Self {
        self.list_style = style;
        self
    }

    /// The configured dialect.
    #[must_use]
    pub const fn dialect(&self) -> RangeDialect {
        self.dialect
    }

    /// Render any version specification.
    ///
    /// # Errors
    ///
    /// Returns [`ModpropsError::InvalidRangeSyntax`](crate::core::ModpropsError::InvalidRangeSyntax)
    /// for a range whose bounds break their invariants.
    pub fn render(&self, spec: &VersionSpec) -> Result<String> {
        match spec {
            VersionSpec::Wildcard => Ok(match self.dialect {
                RangeDialect::Interval => "+".to_string(),
                RangeDialect::Comparator => "*".to_string(),
            }),
            VersionSpec::ExactSet(versions) => Ok(self.render_exact_set(versions)),
            VersionSpec::Range(bounds) => self.render_bounds(bounds),
        }
    }

    /// Render one range.
    ///
    /// # Errors
    ///
    /// Returns [`ModpropsError::InvalidRangeSyntax`](crate::core::ModpropsError::InvalidRangeSyntax)
    /// if `bounds` has an empty minimum or an inclusive absent maximum.
    pub fn render_bounds(&self, bounds: &Bounds) -> Result<String> {
        bounds.validate(&bounds.to_string())?;

        let min = &bounds.min;
        let rendered = match (self.dialect, bounds.upper()) {
            (RangeDialect::Interval, None) => format!("[{min},)"),
            (RangeDialect::Comparator, None) => format!(">={min}"),
            (RangeDialect::Interval, Some(_)) if bounds.is_point() => format!("[{min}]"),
            (RangeDialect::Comparator, Some(_)) if bounds.is_point() => format!("={min}"),
            (RangeDialect::Interval, Some(max)) if bounds.max_inclusive => format!("[{min},{max}]"),
            (RangeDialect::Interval, Some(max)) => format!("[{min},{max})"),
            (RangeDialect::Comparator, Some(max)) if bounds.max_inclusive => {
                format!(">={min} <={max}")
            }
            (RangeDialect::Comparator, Some(max)) => format!(">={min} <{max}"),
        };
        Ok(rendered)
    }

    fn render_exact_set(&self, versions: &[String]) -> String {
        match (self.dialect, self.list_style) {
            (RangeDialect::Interval, _) => {
                versions.iter().map(|v| format!("[{v}]")).collect::<Vec<_>>().join(",")
            }
            (RangeDialect::Comparator, ComparatorListStyle::Quoted) => {
                versions.iter().map(|v| format!("\"={v}\"")).collect::<Vec<_>>().join(", ")
            }
            (RangeDialect::Comparator, ComparatorListStyle::Space) => {
                versions.iter().map(|v| format!("={v}")).collect::<Vec<_>>().join(" ")
            }
        }
    }
}

/// Parse `constraint` and render it in `dialect`.
///
/// # Errors
///
/// Propagates parse errors from [`VersionSpec::parse`].
///
/// # Examples
///
/// ```rust
/// use modprops::version::{RangeDialect, translate};
///
/// assert_eq!(translate("+", RangeDialect::Comparator)?, "*");
/// assert_eq!(translate("[1.20,)", RangeDialect::Comparator)?, ">=1.20");
/// # Ok::<(), modprops::core::ModpropsError>(())
/// ```
pub fn translate(constraint: &str, dialect: RangeDialect) -> Result<String> {
    RangeRenderer::new(dialect).render(&VersionSpec::parse(constraint)?)
}
