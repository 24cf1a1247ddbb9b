//! Section model for the hap help-authoring engine.
//!
//! A document is an ordered sequence of titled markdown sections. This crate
//! provides the two value types shared across the workspace — [`Section`]
//! (markdown source) and [`RenderedSection`] (derived HTML) — plus
//! [`SectionList`], the ordered collection the editor mutates.
//!
//! Ordering is significant: it defines reading and navigation order. Titles
//! are display labels only and need not be unique; every cross-reference in
//! the pipeline uses the ordinal index.

mod list;

pub use list::SectionList;

/// A titled block of markdown source forming one page of a document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    /// Display title shown in navigation. Not required to be unique.
    pub title: String,
    /// Markdown source text. Untrusted free text; never validated.
    pub content: String,
}

impl Section {
    /// Create a section from title and markdown content.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// The placeholder section used wherever the model must stay non-empty.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new("Untitled", "")
    }
}

/// A section after markdown rendering, derived 1:1 from [`Section`].
///
/// Created fresh on every export or preview call and discarded once the
/// final document string is produced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedSection {
    /// Display title, carried through unchanged from the source section.
    pub title: String,
    /// Rendered HTML fragment.
    pub html: String,
}

impl RenderedSection {
    /// Create a rendered section from title and HTML.
    #[must_use]
    pub fn new(title: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            html: html.into(),
        }
    }
}
