//! Output formatting for books and reviews (pretty JSON or Jinja templates).

use crate::entity::{Book, Review};
use crate::error::{Error, Result};
use minijinja::Environment;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Renders records into output bytes - enables mocking for tests.
pub trait BookFormatter: Send + Sync {
    /// Formats a book, with the template at `template` if given.
    fn format_book(&self, book: &Book, template: Option<&Path>) -> Result<Vec<u8>>;

    /// Formats a review, with the template at `template` if given.
    fn format_review(&self, review: &Review, template: Option<&Path>) -> Result<Vec<u8>>;
}

/// Formatter backed by template files.
///
/// Without a template the record is written as pretty JSON. With one, the
/// record's fields are the template's top-level variables, so a book template
/// uses `{{ title }}` and a review template uses `{{ book.title }}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateFormatter;

impl TemplateFormatter {
    pub fn new() -> Self {
        Self
    }

    fn render<S: Serialize>(&self, value: &S, template: Option<&Path>) -> Result<Vec<u8>> {
        let Some(path) = template else {
            let mut out = serde_json::to_vec_pretty(value)
                .map_err(|e| Error::wrap(e, "failed to encode JSON"))?;
            out.push(b'\n');
            return Ok(out);
        };

        debug!("Rendering template: {}", path.display());
        let source = std::fs::read_to_string(path).map_err(|e| {
            Error::wrap(e, "failed to read template").with_param("template", path.display().to_string())
        })?;

        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        let rendered = env.render_str(&source, value).map_err(|e| {
            Error::wrap(e, "failed to render template")
                .with_param("template", path.display().to_string())
        })?;

        Ok(rendered.into_bytes())
    }
}

impl BookFormatter for TemplateFormatter {
    fn format_book(&self, book: &Book, template: Option<&Path>) -> Result<Vec<u8>> {
        self.render(book, template)
    }

    fn format_review(&self, review: &Review, template: Option<&Path>) -> Result<Vec<u8>> {
        self.render(review, template)
    }
}
