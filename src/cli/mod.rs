//! Command-line interface for modprops.
//!
//! The binary exposes the library through three subcommands:
//!
//! - `range` - translate a version constraint between the interval and comparator
//!   dialects
//! - `properties` - print the merged interpolation tree of a module, or one value
//! - `render` - expand a resource directory against that tree
//!
//! # Global Options
//!
//! - `--verbose` / `-v`: debug logging
//! - `--quiet` / `-q`: errors only
//!
//! `RUST_LOG`, when set, overrides both.
//!
//! # Examples
//!
//! ```bash
//! modprops range "1.20.+" --dialect comparator
//! modprops properties --config modprops.toml --get minecraft.range.fabric
//! modprops -v render --input src/main/templates --output build/resources
//! ```
//!
//! # Command Modules
//!
//! - `range` - [`RangeCommand`]
//! - `properties` - [`PropertiesCommand`]
//! - `render` - [`RenderCommand`]

mod properties;
mod range;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub use properties::{PropertiesCommand, PropertiesFormat};
pub use range::RangeCommand;
pub use render::RenderCommand;

/// Runtime settings derived from the global flags.
///
/// Kept apart from [`Cli`] so tests can drive a command with a chosen log level
/// without going through argument parsing.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Filter directive for the log subscriber, `None` to log nothing.
    ///
    /// Common values are `"error"`, `"warn"`, `"info"`, `"debug"` and `"trace"`.
    pub log_level: Option<String>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Install the global `tracing` subscriber.
    ///
    /// `RUST_LOG` takes precedence over [`log_level`](Self::log_level). Output goes
    /// to stderr so that stdout only carries command results. Installing twice is
    /// a no-op.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if let Some(level) = &self.log_level {
            EnvFilter::new(level)
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Version-range translation and property merging for mod builds.
#[derive(Parser, Debug)]
#[command(
    name = "modprops",
    about = "Version-range translation and hierarchical property merging for mod builds",
    version,
    long_about = "Translates dependency version constraints between the Maven interval \
                  dialect and the npm comparator dialect, merges layered build properties \
                  into one tree, and renders resource templates against it."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors. Mutually exclusive with `--verbose`.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a version constraint into a range dialect
    Range(RangeCommand),

    /// Print the merged interpolation tree of a module
    Properties(PropertiesCommand),

    /// Render a resource directory against the interpolation tree
    Render(RenderCommand),
}

impl Cli {
    /// Execute the parsed command with logging configured from the global flags.
    ///
    /// # Errors
    ///
    /// Returns the error of the executed command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    ///
    /// ```rust
    /// use clap::Parser;
    /// use modprops::cli::Cli;
    ///
    /// let cli = Cli::parse_from(["modprops", "--verbose", "range", "1.20"]);
    /// assert_eq!(cli.build_config().log_level.as_deref(), Some("debug"));
    /// ```
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig::new().with_log_level(log_level)
    }

    /// Execute the parsed command with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns the error of the executed command.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Range(cmd) => cmd.execute(),
            Commands::Properties(cmd) => cmd.execute().await,
            Commands::Render(cmd) => cmd.execute().await,
        }
    }
}
