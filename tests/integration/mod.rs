//! Integration test suite for modprops
//!
//! End-to-end tests that run the `modprops` binary against temporary projects.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **range**: the `range` command and its exit codes
//! - **properties**: configuration loading and the merged tree
//! - **render**: resource expansion

mod properties;
mod range;
mod render;

use assert_cmd::Command;
use modprops::test_utils::init_test_logging;

/// The `modprops` binary with logging quiet unless the test sets `RUST_LOG`.
///
/// Logging of the test process itself follows `RUST_LOG`.
pub fn modprops() -> Command {
    init_test_logging(None);
    let mut cmd = Command::cargo_bin("modprops").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}
