//! Template compositor for the hap export pipeline.
//!
//! Merges rendered sections, a sidebar navigation listing, and a document
//! title into one self-contained HTML document. The document embeds the full
//! section array as inline data plus the navigation runtime script, so the
//! exported file works offline in any browser with no server and no
//! dependency on the authoring application. Only decoration (syntax
//! highlighting theme and script) references a CDN; without network the
//! reader loses highlighting, never content or navigation.
//!
//! Substitution goes through a minijinja template rather than string
//! replacement: each named slot is rendered exactly once with context-aware
//! escaping, so slot-shaped text inside author content stays inert and
//! titles are HTML-escaped where they land in markup.

mod compositor;
mod script;

pub use compositor::{Compositor, ComposeError, DEFAULT_DOC_TITLE};
