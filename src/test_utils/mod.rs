//! Test utilities for modprops
//!
//! Logging setup for tests plus fixtures for build configurations,
//! `gradle.properties` files and resource templates.
//!
//! # Example
//!
//! ```rust,no_run
//! use modprops::test_utils::{ConfigFixture, PropertiesFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let dir = tempfile::tempdir().unwrap();
//! ConfigFixture::neoforge().write_to(dir.path()).unwrap();
//! PropertiesFixture::basic().write_to(dir.path()).unwrap();
//! ```

pub mod fixtures;

pub use fixtures::{ConfigFixture, PropertiesFixture, TemplateFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. `level` wins over `RUST_LOG`; with neither,
/// nothing is logged.
///
/// # Example
///
/// ```rust,no_run
/// use tracing::Level;
///
/// modprops::test_utils::init_test_logging(Some(Level::DEBUG));
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_logging_is_idempotent() {
        init_test_logging(Some(Level::DEBUG));
        init_test_logging(None);
        tracing::debug!("logged once the subscriber is installed");
    }
}
