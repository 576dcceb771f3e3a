//! The accepted-version specification handed to the renderer.

use std::fmt;

use super::Bounds;
use crate::core::Result;

/// Which versions a dependency or a game-version set accepts.
///
/// # Examples
///
/// ```rust
/// use modprops::version::VersionSpec;
///
/// assert_eq!(VersionSpec::parse("+")?, VersionSpec::Wildcard);
/// assert!(matches!(VersionSpec::parse("[1.20,1.21)")?, VersionSpec::Range(_)));
///
/// let set = VersionSpec::exact_set("1.21", ["1.21.1", ""]);
/// assert_eq!(set, VersionSpec::ExactSet(vec!["1.21".into(), "1.21.1".into()]));
/// # Ok::<(), modprops::core::ModpropsError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpec {
    /// The literal `+` token: accept anything
    Wildcard,
    /// An explicit, ordered list of accepted versions
    ExactSet(Vec<String>),
    /// A single continuous range
    Range(Bounds),
}

impl VersionSpec {
    /// Parse a constraint string, special-casing the `+` wildcard.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Bounds::parse`].
    pub fn parse(constraint: &str) -> Result<Self> {
        if constraint == "+" {
            return Ok(Self::Wildcard);
        }
        Bounds::parse(constraint).map(Self::Range)
    }

    /// Build an exact set from a primary version and additional accepted versions.
    ///
    /// Blank entries are dropped; order is preserved with the primary first.
    pub fn exact_set<I, S>(primary: &str, additional: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let versions = std::iter::once(primary.to_string())
            .chain(additional.into_iter().map(|v| v.as_ref().to_string()))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        Self::ExactSet(versions)
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => write!(f, "+"),
            Self::ExactSet(versions) => write!(f, "{{{}}}", versions.join(", ")),
            Self::Range(bounds) => write!(f, "{bounds}"),
        }
    }
}
