//! Template rendering engine with Tera.
//!
//! Resource files reference the interpolation tree with Tera expressions:
//!
//! ```text
//! "depends": {
//!   "minecraft": [{{ minecraft.range.fabric }}],
//!   "java": "{{ java.range.fabric }}"
//! }
//! ```

use regex::Regex;
use std::sync::LazyLock;
use tera::{Context as TeraContext, Tera};

use crate::core::{ModpropsError, Result};
use crate::properties::PropertyTree;

static MISSING_VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Variable `([^`]+)` not found").expect("missing variable pattern is valid")
});

/// Renders template text against one interpolation tree.
///
/// Building the renderer is the one point where every deferred value in the tree
/// is forced.
///
/// # Examples
///
/// ```rust
/// use modprops::properties::{merge_sources, source};
/// use modprops::templating::TemplateRenderer;
/// use serde_json::json;
///
/// let tree = merge_sources([source::from_json(json!({ "minecraftVersion": "1.21" }))])?;
/// let renderer = TemplateRenderer::new(&tree)?;
/// assert_eq!(renderer.render_str("mc={{ minecraft.version }}", "x.txt")?, "mc=1.21");
/// # Ok::<(), modprops::core::ModpropsError>(())
/// ```
pub struct TemplateRenderer {
    context: TeraContext,
    available: Vec<String>,
    tree: PropertyTree,
}

impl TemplateRenderer {
    /// Prepare a renderer, resolving every deferred value in `tree`.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing deferred value, or
    /// [`ModpropsError::TemplateError`] if the tree cannot become a Tera context.
    pub fn new(tree: &PropertyTree) -> Result<Self> {
        let json = tree.to_json()?;
        let context = TeraContext::from_value(json).map_err(|e| ModpropsError::TemplateError {
            file: "<context>".to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!("Template context holds {} leaf values", tree.leaf_paths().len());

        Ok(Self {
            context,
            available: tree.leaf_paths(),
            tree: tree.clone(),
        })
    }

    /// Dotted paths a template can reference.
    #[must_use]
    pub fn available_variables(&self) -> &[String] {
        &self.available
    }

    /// Render `content`. `file` names the template in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ModpropsError::TemplateError`] for syntax errors and unknown
    /// variables. For an unknown variable the reason lists close matches.
    pub fn render_str(&self, content: &str, file: &str) -> Result<String> {
        let mut tera = Tera::default();
        tera.render_str(content, &self.context).map_err(|error| ModpropsError::TemplateError {
            file: file.to_string(),
            reason: self.describe(&error),
        })
    }

    fn describe(&self, error: &tera::Error) -> String {
        let messages = error_chain(error);

        if let Some(variable) =
            messages.iter().find_map(|m| MISSING_VARIABLE.captures(m)).map(|c| c[1].to_string())
        {
            let suggestions = self.tree.similar_paths(&variable);
            return if suggestions.is_empty() {
                format!("unknown variable '{variable}'")
            } else {
                format!("unknown variable '{variable}', did you mean '{}'?", suggestions.join("', '"))
            };
        }

        // The first message is Tera's generic "Failed to render"; the causes say why.
        messages.into_iter().skip(1).last().unwrap_or_else(|| error.to_string())
    }
}

fn error_chain(error: &tera::Error) -> Vec<String> {
    let mut messages = vec![error.to_string()];
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        messages.push(cause.to_string());
        source = cause.source();
    }
    messages
}
