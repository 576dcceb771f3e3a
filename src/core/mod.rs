//! Core types and error handling for modprops
//!
//! This module holds the crate-wide error type and the result alias used by
//! every pure component (range parsing and rendering, key normalization, and
//! property merging).
//!
//! # Error Handling Strategy
//!
//! - Pure functions return [`Result<T>`], whose error is a [`ModpropsError`],
//!   so callers can match on the exact failure kind.
//! - Outer layers (configuration loading, the CLI) use `anyhow::Result` and add
//!   context with `.with_context(...)`.
//! - [`user_friendly_error`] turns any error into an [`ErrorContext`] for display.
//!
//! # Example
//!
//! ```rust,no_run
//! use modprops::core::{ModpropsError, Result};
//!
//! fn require_version(version: Option<&str>) -> Result<&str> {
//!     version.ok_or_else(|| ModpropsError::MissingVersionConstraint {
//!         dependency: "net.fabricmc:fabric-loader".to_string(),
//!     })
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, ModpropsError, user_friendly_error};

/// Result alias for the pure components of the crate.
pub type Result<T> = std::result::Result<T, ModpropsError>;
