//! Documentation rendering for protodoc
//!
//! Renders a built `Document` as a plain indented listing or as a Markdown
//! page with a table of contents and cross-reference anchors. Both renderers
//! are pure functions of the document: field types are resolved through
//! `protodoc_common::resolve` and nothing is mutated.

mod templates;
mod text;
mod views;

pub use text::render_text;

use protodoc_common::{DocError, Document, Result};
use tera::Tera;

/// Documentation generator
///
/// Owns the document and a loaded template engine so repeated renders reuse
/// the parsed templates.
pub struct DocGenerator {
    document: Document,
    tera: Tera,
}

impl DocGenerator {
    /// Create a generator for one document
    pub fn new(document: Document) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self { document, tera })
    }

    /// Render the plain text listing
    pub fn render_text(&self) -> String {
        text::render_text(&self.document)
    }

    /// Render the Markdown page
    pub fn render_markdown(&self) -> Result<String> {
        let context = views::markdown_context(&self.document);
        self.tera
            .render("markdown.md", &context)
            .map_err(|e| DocError::Render(format!("Template error: {}", e)))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

/// Render a document as Markdown (convenience function)
pub fn render_markdown(document: &Document) -> Result<String> {
    let tera = templates::load_templates()?;
    let context = views::markdown_context(document);
    tera.render("markdown.md", &context)
        .map_err(|e| DocError::Render(format!("Template error: {}", e)))
}
