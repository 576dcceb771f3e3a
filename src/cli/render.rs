//! Expand a resource directory.
//!
//! Every file under `--input` is rendered with Tera against the module's
//! interpolation tree and written to the same relative path under `--output`.
//! Files matching an exclusion glob are copied unchanged.
//!
//! ```bash
//! modprops render --input src/main/templates --output build/generated/resources
//! modprops render -i templates -o out --exclude "**/*.nbt"
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{BuildConfig, DEFAULT_CONFIG_FILE};
use crate::templating::{InterpolationContextBuilder, ResourceExpander, TemplateRenderer};

/// Command to render resource templates.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Build configuration file
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory holding the resource templates
    #[arg(short, long, value_name = "DIR")]
    pub input: PathBuf,

    /// Directory receiving the rendered resources
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Extra glob of files to copy without rendering, relative to the input
    #[arg(short, long, value_name = "GLOB")]
    pub exclude: Vec<String>,
}

impl RenderCommand {
    /// Render the resources.
    ///
    /// # Errors
    ///
    /// Returns configuration and merge errors, an invalid exclusion glob, IO
    /// errors, or the first template that fails to render.
    pub async fn execute(self) -> Result<()> {
        let config = BuildConfig::load(&self.config).await?;
        let tree = InterpolationContextBuilder::new(&config).build()?;
        let renderer = TemplateRenderer::new(&tree)?;
        let expander = ResourceExpander::with_defaults(&self.exclude)?;

        let summary = expander.expand(&renderer, &self.input, &self.output).await?;
        println!(
            "{} {} rendered, {} copied into {}",
            "✓".green(),
            summary.rendered,
            summary.copied,
            self.output.display()
        );
        Ok(())
    }
}
