//! Skeleton template loading and slot substitution.

use std::fs;
use std::path::PathBuf;

use minijinja::value::Value;
use minijinja::{Environment, context};

use hap_renderer::escape_html;
use hap_sections::RenderedSection;

use crate::script::script_block;

/// Title used when the caller supplies a blank document title.
pub const DEFAULT_DOC_TITLE: &str = "Help Documentation";

/// Skeleton compiled into the binary; used unless an override path is set.
const BUNDLED_SKELETON: &str = include_str!("../templates/viewer.html");

/// Template name registered with the minijinja environment. The `.html`
/// extension turns on HTML auto-escaping for plain slots.
const TEMPLATE_NAME: &str = "viewer.html";

/// The named slots a skeleton must contain, each exactly once.
const REQUIRED_SLOTS: [(&str, &str); 5] = [
    ("doc_title", "{{ doc_title }}"),
    ("initial_title", "{{ initial_title }}"),
    ("initial_content", "{{ initial_content }}"),
    ("sidebar_html", "{{ sidebar_html }}"),
    ("script_block", "{{ script_block }}"),
];

/// Error returned when composition fails.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    /// The skeleton override file cannot be read. Installation error of the
    /// surrounding application; surfaced verbatim, never silently defaulted.
    #[error("skeleton template not found: {}", path.display())]
    TemplateMissing {
        /// Path of the missing skeleton file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A named slot is absent or repeated in the skeleton.
    #[error("skeleton template slot `{{{{ {slot} }}}}` must appear exactly once (found {count})")]
    SlotMismatch {
        /// Slot name.
        slot: &'static str,
        /// Number of occurrences found.
        count: usize,
    },
    /// The skeleton failed to parse or render as a template.
    #[error("skeleton template error: {0}")]
    Template(#[from] minijinja::Error),
    /// Section data could not be serialized for embedding.
    #[error("section data serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Assembles the final standalone HTML document from rendered sections.
///
/// Composition is a pure function of its inputs: no timestamps, no ambient
/// state. Calling [`compose`](Self::compose) twice with identical input
/// yields byte-identical output.
#[derive(Clone, Debug, Default)]
pub struct Compositor {
    /// On-disk skeleton override; bundled skeleton when `None`.
    template_path: Option<PathBuf>,
}

impl Compositor {
    /// Compositor using the bundled skeleton.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compositor reading the skeleton from `path` on every compose call.
    ///
    /// The override must carry the same five `{{ slot }}` tokens as the
    /// bundled skeleton, each exactly once.
    #[must_use]
    pub fn with_template_file(path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: Some(path.into()),
        }
    }

    /// Merge rendered sections and a document title into one HTML document.
    ///
    /// A blank `doc_title` collapses to [`DEFAULT_DOC_TITLE`]. The first
    /// section becomes the initially displayed one; an empty slice (which
    /// upstream contracts already rule out) falls back to a "No content"
    /// placeholder rather than failing.
    pub fn compose(
        &self,
        sections: &[RenderedSection],
        doc_title: &str,
    ) -> Result<String, ComposeError> {
        let skeleton = self.load_skeleton()?;
        verify_slots(&skeleton)?;

        let trimmed = doc_title.trim();
        let used_title = if trimmed.is_empty() {
            DEFAULT_DOC_TITLE
        } else {
            trimmed
        };

        let fallback;
        let sections = if sections.is_empty() {
            fallback = [RenderedSection::new("Untitled", "<p>No content</p>")];
            &fallback[..]
        } else {
            sections
        };
        let initial = &sections[0];

        let script = script_block(sections, used_title)?;
        let sidebar = sidebar_html(sections);

        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, &skeleton)?;
        let template = env.get_template(TEMPLATE_NAME)?;
        let html = template.render(context! {
            doc_title => used_title,
            initial_title => initial.title.as_str(),
            initial_content => Value::from_safe_string(initial.html.clone()),
            sidebar_html => Value::from_safe_string(sidebar),
            script_block => Value::from_safe_string(script),
        })?;

        tracing::debug!(
            sections = sections.len(),
            bytes = html.len(),
            "composed export document"
        );
        Ok(html)
    }

    fn load_skeleton(&self) -> Result<String, ComposeError> {
        match &self.template_path {
            Some(path) => {
                fs::read_to_string(path).map_err(|source| ComposeError::TemplateMissing {
                    path: path.clone(),
                    source,
                })
            }
            None => Ok(BUNDLED_SKELETON.to_owned()),
        }
    }
}

/// Check that every required slot occurs exactly once in the skeleton.
fn verify_slots(skeleton: &str) -> Result<(), ComposeError> {
    for (slot, token) in REQUIRED_SLOTS {
        let count = skeleton.matches(token).count();
        if count != 1 {
            return Err(ComposeError::SlotMismatch { slot, count });
        }
    }
    Ok(())
}

/// One `<li>` per section in list order. The `data-index` ordinal is the
/// sole cross-reference key into the section array; titles may repeat.
fn sidebar_html(sections: &[RenderedSection]) -> String {
    sections
        .iter()
        .enumerate()
        .map(|(index, section)| {
            format!(
                r#"        <li class="section-item" data-index="{index}">{}</li>"#,
                escape_html(&section.title)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
