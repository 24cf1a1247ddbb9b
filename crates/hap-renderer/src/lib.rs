//! Markdown rendering for the hap export pipeline.
//!
//! Converts one markdown string into an HTML fragment via pulldown-cmark
//! with GFM extensions (tables, strikethrough, task lists).
//!
//! The renderer is a pure function boundary with three fixed properties the
//! rest of the pipeline depends on:
//!
//! - Deterministic: identical input yields byte-identical output.
//! - Total: author content is untrusted free text; malformed markdown
//!   degrades to best-effort HTML and never aborts an export.
//! - No generated heading IDs or identifier mangling — the exported
//!   document's navigation runtime owns in-page addressing, so headings
//!   render as plain tags.
//!
//! # Example
//!
//! ```
//! let html = hap_renderer::render("# Hello\n\n**Bold** text");
//! assert!(html.contains("<h1>Hello</h1>"));
//! ```

mod renderer;

pub use renderer::{escape_html, render};

use hap_sections::{RenderedSection, Section};

/// Render every section of a snapshot, preserving order.
#[must_use]
pub fn render_sections(sections: &[Section]) -> Vec<RenderedSection> {
    sections
        .iter()
        .map(|section| RenderedSection::new(section.title.clone(), render(&section.content)))
        .collect()
}
