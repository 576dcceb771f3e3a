//! Parsing of a single version constraint into [`Bounds`].
//!
//! The grammar recognized, in priority order:
//!
//! | Form | Example | Result |
//! |------|---------|--------|
//! | Prefix wildcard | `1.20.+` | `[1.20, 1.21)` |
//! | Exact version | `1.20.1` | `[1.20.1, 1.20.1]` |
//! | Interval | `[1.20,1.21)`, `(1.0,)`, `[1.0, 2.0]` | as written |
//!
//! The bare `+` token is not a range. Callers turn it into
//! [`VersionSpec::Wildcard`](super::VersionSpec::Wildcard) before parsing; handing
//! it to [`Bounds::parse`] is an error.
//!
//! Constraints are compared as strings only. Incrementing the last segment of a
//! prefix wildcard is a textual operation: `1.9.+` becomes `[1.9, 1.10)`.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::trace;

use crate::core::{ModpropsError, Result};

/// One bracketed interval: opening bracket, minimum, optional `,` + maximum, closing bracket.
static INTERVAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<opener>[(\[])(?P<min>[0-9a-zA-Z.\-]+)(?:, ?(?P<max>[0-9a-zA-Z.\-]*))?(?P<closer>[)\]])")
        .expect("interval pattern is valid")
});

/// Characters that mark a constraint as an interval rather than an exact version.
const INTERVAL_CHARS: [char; 5] = [',', '[', ']', '(', ')'];

/// The bounds of a parsed version range.
///
/// `min` is always a non-empty version token. When `max` is absent the range is
/// unbounded above and `max_inclusive` must be `false`. When `min == max` the
/// bounds denote exactly one version, whatever `max_inclusive` says.
///
/// The fields are public so that callers can build bounds directly; use
/// [`Bounds::new`] to have the invariants checked, and note that the renderer
/// checks them again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bounds {
    /// Lower bound (always inclusive)
    pub min: String,
    /// Upper bound, `None` for unbounded
    pub max: Option<String>,
    /// Whether `max` itself is accepted
    pub max_inclusive: bool,
}

impl Bounds {
    /// Create bounds, enforcing the invariants.
    ///
    /// A blank `max` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ModpropsError::InvalidRangeSyntax`] if `min` is empty or if an
    /// absent maximum is marked inclusive.
    pub fn new(
        min: impl Into<String>,
        max: Option<impl Into<String>>,
        max_inclusive: bool,
    ) -> Result<Self> {
        let min = min.into();
        let max = max.map(Into::into).filter(|m: &String| !m.trim().is_empty());
        let bounds = Self {
            min,
            max,
            max_inclusive,
        };
        bounds.validate(&bounds.to_string())?;
        Ok(bounds)
    }

    /// Bounds accepting exactly `version`.
    ///
    /// # Errors
    ///
    /// Returns [`ModpropsError::InvalidRangeSyntax`] if `version` is empty.
    pub fn exact(version: impl Into<String>) -> Result<Self> {
        let version = version.into();
        Self::new(version.clone(), Some(version), true)
    }

    /// Parse a version constraint.
    ///
    /// # Errors
    ///
    /// - [`ModpropsError::MultipleDisjointRanges`] if more than one bracketed
    ///   interval appears in the string
    /// - [`ModpropsError::InvalidRangeSyntax`] for anything else that is not
    ///   one of the recognized forms, for a non-numeric last segment in a
    ///   `.+` constraint, and for an inclusive bound without a maximum
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modprops::version::Bounds;
    ///
    /// let bounds = Bounds::parse("1.9.+")?;
    /// assert_eq!(bounds.min, "1.9");
    /// assert_eq!(bounds.max.as_deref(), Some("1.10"));
    /// assert!(!bounds.max_inclusive);
    /// # Ok::<(), modprops::core::ModpropsError>(())
    /// ```
    pub fn parse(constraint: &str) -> Result<Self> {
        if constraint == "+" {
            return Err(invalid(constraint, "the wildcard '+' has no bounds"));
        }

        if INTERVAL_PATTERN.find_iter(constraint).count() > 1 {
            return Err(ModpropsError::MultipleDisjointRanges {
                constraint: constraint.to_string(),
            });
        }

        let bounds = if let Some(prefix) = constraint.strip_suffix(".+") {
            Self::parse_prefix_wildcard(constraint, prefix)?
        } else if !constraint.contains(INTERVAL_CHARS) {
            Self::exact(constraint).map_err(|_| invalid(constraint, "empty version"))?
        } else {
            Self::parse_interval(constraint)?
        };

        trace!("Parsed version constraint '{}' as {}", constraint, bounds);
        Ok(bounds)
    }

    /// `1.20.+` → `[1.20, 1.21)`: bump the last dot-separated segment of the prefix.
    fn parse_prefix_wildcard(constraint: &str, min: &str) -> Result<Self> {
        let (head, last) = match min.rfind('.') {
            Some(idx) => min.split_at(idx + 1),
            None => ("", min),
        };

        if last.is_empty() || !last.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(
                constraint,
                &format!("segment '{last}' before '.+' is not a non-negative integer"),
            ));
        }

        let next = last
            .parse::<u64>()
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| invalid(constraint, &format!("segment '{last}' is too large")))?;

        Ok(Self {
            min: min.to_string(),
            max: Some(format!("{head}{next}")),
            max_inclusive: false,
        })
    }

    /// `[min,max)`-style constraint; the single interval must span the whole string.
    fn parse_interval(constraint: &str) -> Result<Self> {
        let captures = INTERVAL_PATTERN
            .captures(constraint)
            .filter(|c| c.get(0).is_some_and(|m| m.start() == 0 && m.end() == constraint.len()))
            .ok_or_else(|| invalid(constraint, "not a recognized version range"))?;

        let min = &captures["min"];
        let max = captures.name("max").map(|m| m.as_str()).filter(|m| !m.is_empty());
        let max_inclusive = &captures["closer"] == "]";

        let bounds = Self {
            min: min.to_string(),
            max: max.map(str::to_string),
            max_inclusive,
        };
        bounds.validate(constraint)?;
        Ok(bounds)
    }

    /// Check the invariants, reporting `constraint` as the offender.
    pub(crate) fn validate(&self, constraint: &str) -> Result<()> {
        if self.min.is_empty() {
            return Err(invalid(constraint, "the minimum version is empty"));
        }
        if self.is_unbounded() && self.max_inclusive {
            return Err(invalid(
                constraint,
                "a range without a maximum cannot have an inclusive maximum",
            ));
        }
        Ok(())
    }

    /// Whether the bounds accept exactly one version.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.max.as_deref() == Some(self.min.as_str())
    }

    /// Whether the range has no upper bound. A blank maximum counts as none.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.upper().is_none()
    }

    /// The maximum, unless it is absent or blank.
    #[must_use]
    pub fn upper(&self) -> Option<&str> {
        self.max.as_deref().filter(|max| !max.trim().is_empty())
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let closer = if self.max_inclusive {
            ']'
        } else {
            ')'
        };
        write!(f, "[{},{}{}", self.min, self.max.as_deref().unwrap_or(""), closer)
    }
}

fn invalid(constraint: &str, reason: &str) -> ModpropsError {
    ModpropsError::InvalidRangeSyntax {
        constraint: constraint.to_string(),
        reason: reason.to_string(),
    }
}
