//! Expansion of a resource directory.
//!
//! Every file under the input directory is either rendered through the
//! [`TemplateRenderer`] or, when its relative path matches an exclusion glob,
//! copied byte for byte. The output directory mirrors the input layout.

use anyhow::{Context, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, trace};
use walkdir::WalkDir;

use super::TemplateRenderer;

/// Files that are never rendered: configs, access wideners, binaries, images and
/// translation files.
pub const DEFAULT_EXCLUDES: [&str; 9] = [
    "**/*.cfg",
    "**/*.accesswidener",
    "**/*.jar",
    "**/*.png",
    "**/*.jpg",
    "**/*.gif",
    "**/*.ico",
    "**/*.svg",
    "**/lang/**",
];

/// Counts reported after an expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionSummary {
    pub rendered: usize,
    pub copied: usize,
}

/// Renders or copies every file of a resource directory.
#[derive(Debug, Clone)]
pub struct ResourceExpander {
    excludes: Vec<Pattern>,
}

impl ResourceExpander {
    /// Expander with the given exclusion globs, matched against `/`-separated
    /// paths relative to the input directory.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid glob.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let excludes = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Pattern::new(p).with_context(|| format!("Invalid glob pattern: {p}"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            excludes,
        })
    }

    /// Expander with [`DEFAULT_EXCLUDES`] plus `extra`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid glob in `extra`.
    pub fn with_defaults<S: AsRef<str>>(extra: &[S]) -> Result<Self> {
        Self::new(
            DEFAULT_EXCLUDES
                .iter()
                .map(|p| (*p).to_string())
                .chain(extra.iter().map(|p| p.as_ref().to_string())),
        )
    }

    /// Whether a relative path is copied instead of rendered.
    #[must_use]
    pub fn is_excluded(&self, relative: &Path) -> bool {
        let unix = to_unix(relative);
        self.excludes.iter().any(|pattern| pattern.matches(&unix))
    }

    /// Render or copy every file under `input` into `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be walked, a file cannot be read or
    /// written, or a template fails to render. Rendering stops at the first error.
    pub async fn expand(
        &self,
        renderer: &TemplateRenderer,
        input: &Path,
        output: &Path,
    ) -> Result<ExpansionSummary> {
        let files = collect_files(input)?;
        debug!("Expanding {} files from {}", files.len(), input.display());

        let mut summary = ExpansionSummary::default();
        for relative in files {
            let source = input.join(&relative);
            let target = output.join(&relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }

            if self.is_excluded(&relative) {
                trace!("Copying {}", relative.display());
                fs::copy(&source, &target).await.with_context(|| {
                    format!("Failed to copy {} to {}", source.display(), target.display())
                })?;
                summary.copied += 1;
                continue;
            }

            trace!("Rendering {}", relative.display());
            let content = fs::read_to_string(&source)
                .await
                .with_context(|| format!("Failed to read template: {}", source.display()))?;
            let rendered = renderer.render_str(&content, &to_unix(&relative))?;
            fs::write(&target, rendered)
                .await
                .with_context(|| format!("Failed to write {}", target.display()))?;
            summary.rendered += 1;
        }

        info!(
            "Expanded resources into {} ({} rendered, {} copied)",
            output.display(),
            summary.rendered,
            summary.copied
        );
        Ok(summary)
    }
}

/// Relative paths of every file under `root`, sorted.
fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .with_context(|| format!("{} is outside {}", entry.path().display(), root.display()))?;
        files.push(relative.to_path_buf());
    }
    Ok(files)
}

fn to_unix(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
