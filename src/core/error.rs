//! Error handling for modprops
//!
//! This module provides the error types and user-friendly error reporting for
//! modprops. The error system follows two principles:
//! 1. **Strongly-typed errors** so callers (and tests) can match on the exact failure
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`ModpropsError`] - Enumerated error kinds for every failure in the crate
//! - [`ErrorContext`] - Wrapper that adds details and suggestions for display
//!
//! # Error Categories
//!
//! - **Version ranges**: [`ModpropsError::InvalidRangeSyntax`],
//!   [`ModpropsError::MultipleDisjointRanges`], [`ModpropsError::MissingVersionConstraint`]
//! - **Property merging**: [`ModpropsError::ConflictingMergeTypes`]
//! - **Configuration**: [`ModpropsError::ConfigNotFound`], [`ModpropsError::ConfigError`],
//!   [`ModpropsError::PropertiesParseError`]
//! - **Rendering**: [`ModpropsError::TemplateError`]
//!
//! Every error is a configuration-time failure. Nothing in the crate retries or
//! recovers locally: an error aborts the current evaluation and surfaces here.
//!
//! # Examples
//!
//! ```rust,no_run
//! use modprops::core::{ModpropsError, user_friendly_error};
//!
//! let error = ModpropsError::MultipleDisjointRanges {
//!     constraint: "[1.0,2.0)[3.0,4.0)".to_string(),
//! };
//! let context = user_friendly_error(anyhow::Error::from(error));
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for modprops operations.
///
/// The first four variants are the failure kinds of the translation engine and
/// the property merger. The remaining variants belong to the outer layers
/// (configuration loading, resource rendering) and wrap common library errors.
#[derive(Error, Debug)]
pub enum ModpropsError {
    /// A version constraint matches none of the recognized grammar forms
    ///
    /// Also raised when the last segment of a `.+` constraint is not numeric, or
    /// when a range has no maximum but claims an inclusive one.
    #[error("Invalid version range '{constraint}': {reason}")]
    InvalidRangeSyntax {
        /// The offending constraint string
        constraint: String,
        /// Which rule the constraint violated
        reason: String,
    },

    /// More than one bracketed interval was found in a single constraint
    #[error("Multiple non-continuous version ranges are not supported: '{constraint}'")]
    MultipleDisjointRanges {
        /// The offending constraint string
        constraint: String,
    },

    /// A dependency has no version, required, strict or preferred version
    #[error("Dependency '{dependency}' does not have a version constraint or version specified")]
    MissingVersionConstraint {
        /// Coordinates of the dependency (`group:name`)
        dependency: String,
    },

    /// A scalar and an irreducible nested mapping compete for the same property path
    #[error("Cannot merge a map with a non-map value at '{key}'")]
    ConflictingMergeTypes {
        /// Dotted path of the conflicting property
        key: String,
    },

    /// Build configuration file is missing
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was looked up
        path: String,
    },

    /// Build configuration content is invalid
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// A `.properties` file could not be parsed
    #[error("Invalid properties file {file} at line {line}: {reason}")]
    PropertiesParseError {
        /// File being parsed
        file: String,
        /// 1-based line number
        line: usize,
        /// What was wrong
        reason: String,
    },

    /// A resource template failed to render
    #[error("Failed to render template '{file}': {reason}")]
    TemplateError {
        /// Template file (relative to the resource root)
        file: String,
        /// Rendering failure reported by Tera
        reason: String,
    },

    /// IO error from [`std::io::Error`]
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error from [`toml::de::Error`]
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON error from [`serde_json::Error`]
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Any other failure
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl Clone for ModpropsError {
    fn clone(&self) -> Self {
        match self {
            Self::InvalidRangeSyntax {
                constraint,
                reason,
            } => Self::InvalidRangeSyntax {
                constraint: constraint.clone(),
                reason: reason.clone(),
            },
            Self::MultipleDisjointRanges {
                constraint,
            } => Self::MultipleDisjointRanges {
                constraint: constraint.clone(),
            },
            Self::MissingVersionConstraint {
                dependency,
            } => Self::MissingVersionConstraint {
                dependency: dependency.clone(),
            },
            Self::ConflictingMergeTypes {
                key,
            } => Self::ConflictingMergeTypes {
                key: key.clone(),
            },
            Self::ConfigNotFound {
                path,
            } => Self::ConfigNotFound {
                path: path.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            Self::PropertiesParseError {
                file,
                line,
                reason,
            } => Self::PropertiesParseError {
                file: file.clone(),
                line: *line,
                reason: reason.clone(),
            },
            Self::TemplateError {
                file,
                reason,
            } => Self::TemplateError {
                file: file.clone(),
                reason: reason.clone(),
            },
            // The wrapped library errors are not Clone; keep their message.
            Self::IoError(e) => Self::IoError(std::io::Error::new(e.kind(), e.to_string())),
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::JsonError(e) => Self::Other {
                message: format!("JSON error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` wraps a [`ModpropsError`] and adds optional details and a
/// suggestion for resolution. This is how the CLI presents errors.
///
/// When displayed, errors show:
/// 1. **Error**: the main message in red
/// 2. **Details**: additional context in yellow (optional)
/// 3. **Suggestion**: actionable steps in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use modprops::core::{ErrorContext, ModpropsError};
///
/// let context = ErrorContext::new(ModpropsError::ConfigNotFound {
///     path: "modprops.toml".to_string(),
/// })
/// .with_suggestion("Pass --config with the path to your build configuration");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ModpropsError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no details or suggestion.
    #[must_use]
    pub const fn new(error: ModpropsError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`ModpropsError`] anywhere in the error chain (so errors wrapped
/// with `anyhow::Context` still get tailored suggestions), plain IO errors and
/// TOML errors. Everything else keeps its full cause chain in the message.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(modprops_error) = error.chain().find_map(|e| e.downcast_ref::<ModpropsError>()) {
        let mut context = create_error_context(modprops_error.clone());
        let outer = error.to_string();
        if context.details.is_none() && outer != modprops_error.to_string() {
            context.details = Some(outer);
        }
        return context;
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(ModpropsError::Other {
                    message: error_with_chain(&error),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(ModpropsError::Other {
                    message: error_with_chain(&error),
                })
                .with_suggestion("Check file ownership and permissions of the input and output directories");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(ModpropsError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax of your build configuration. Verify quotes, brackets, and table headers");
    }

    ErrorContext::new(ModpropsError::Other {
        message: error_with_chain(&error),
    })
}

/// Render an error followed by its numbered cause chain.
fn error_with_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

/// Map each [`ModpropsError`] variant to a context with tailored suggestions.
fn create_error_context(error: ModpropsError) -> ErrorContext {
    match &error {
        ModpropsError::InvalidRangeSyntax {
            ..
        } => ErrorContext::new(error)
            .with_suggestion(
                "Use an exact version (1.20.1), a prefix wildcard (1.20.+), a single interval \
                 ([1.20,1.21)) or '+' for any version",
            )
            .with_details("Intervals need an explicit maximum when they end with ']'"),
        ModpropsError::MultipleDisjointRanges {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Collapse the constraint into one continuous interval")
            .with_details("Only a single bracketed interval can be translated between range dialects"),
        ModpropsError::MissingVersionConstraint {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Set 'version' (or one of 'required', 'strict', 'preferred') on the dependency",
        ),
        ModpropsError::ConflictingMergeTypes {
            ..
        } => ErrorContext::new(error)
            .with_suggestion(
                "Rename one of the properties, or define the scalar as '<key>._' next to its children",
            )
            .with_details(
                "A later property source tried to nest values under a key that an earlier source set to a plain value",
            ),
        ModpropsError::ConfigNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Create a modprops.toml file or pass --config with its path"),
        ModpropsError::PropertiesParseError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Each entry must be 'key=value', 'key: value' or 'key value'"),
        ModpropsError::TemplateError {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Check template syntax: variables use {{ var }}. Run 'modprops properties' to list available keys",
        ),
        _ => ErrorContext::new(error),
    }
}
