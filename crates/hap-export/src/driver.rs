//! Export orchestration: render, compose, persist, report.

use std::io::Write;
use std::path::{Path, PathBuf};

use hap_compose::{ComposeError, Compositor};
use hap_pdf::{PdfError, PdfOptions};
use hap_renderer::render_sections;
use hap_sections::Section;

use crate::launch::{BrowserLauncher, SystemLauncher};

/// Result of a successful export call.
#[derive(Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The document was written to this path.
    Written(PathBuf),
    /// The destination-selection step was dismissed; no I/O was performed.
    /// A normal outcome, distinct from failure.
    Cancelled,
}

/// Error returned when an export fails.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Composition failed; the write step was never reached.
    #[error(transparent)]
    Compose(#[from] ComposeError),
    /// PDF snapshot rendering failed.
    #[error(transparent)]
    Pdf(#[from] PdfError),
    /// The destination could not be written. No partial file remains.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Destination path that could not be written.
        path: PathBuf,
        /// Underlying system error.
        #[source]
        source: std::io::Error,
    },
}

/// Drives export and preview for section snapshots.
///
/// Holds the compositor configuration and the browser-launch seam; the
/// exporter itself is stateless across calls.
pub struct Exporter {
    compositor: Compositor,
    launcher: Box<dyn BrowserLauncher>,
}

impl Exporter {
    /// Exporter with the bundled skeleton and the system browser launcher.
    #[must_use]
    pub fn new() -> Self {
        Self::with_compositor(Compositor::new())
    }

    /// Exporter with a specific compositor configuration.
    #[must_use]
    pub fn with_compositor(compositor: Compositor) -> Self {
        Self {
            compositor,
            launcher: Box::new(SystemLauncher),
        }
    }

    /// Replace the browser launcher. Used by tests and embedders that route
    /// the open request themselves.
    #[must_use]
    pub fn with_launcher(mut self, launcher: Box<dyn BrowserLauncher>) -> Self {
        self.launcher = launcher;
        self
    }

    /// Export sections as a standalone HTML document.
    ///
    /// `dest` is the path chosen by the surrounding application's save
    /// prompt; `None` means the prompt was dismissed and the call reports
    /// [`ExportOutcome::Cancelled`] without performing any I/O. The write is
    /// atomic: the document is fully composed in memory and staged to a
    /// temporary file before it appears at `dest`.
    pub fn export_html(
        &self,
        sections: &[Section],
        doc_title: &str,
        dest: Option<&Path>,
    ) -> Result<ExportOutcome, ExportError> {
        let Some(dest) = dest else {
            tracing::debug!("destination selection dismissed; html export cancelled");
            return Ok(ExportOutcome::Cancelled);
        };

        let html = self.compose(sections, doc_title)?;
        write_atomic(dest, html.as_bytes())?;
        tracing::info!(path = %dest.display(), bytes = html.len(), "exported html");
        Ok(ExportOutcome::Written(dest.to_path_buf()))
    }

    /// Compose the document, write it to a fresh uniquely-named temporary
    /// file, and open it in the default browser.
    ///
    /// Every invocation gets a distinct randomized file name, so rapid
    /// repeated previews never collide or serve stale content. The launch is
    /// fire-and-forget: a failure to spawn the browser is logged and the
    /// written path is still returned.
    pub fn preview(&self, sections: &[Section], doc_title: &str) -> Result<PathBuf, ExportError> {
        let html = self.compose(sections, doc_title)?;

        let temp_dir = std::env::temp_dir();
        let wrap_err = |source| ExportError::Write {
            path: temp_dir.clone(),
            source,
        };

        let mut file = tempfile::Builder::new()
            .prefix("hap-preview-")
            .suffix(".html")
            .tempfile()
            .map_err(wrap_err)?;
        file.write_all(html.as_bytes()).map_err(wrap_err)?;
        let (_, path) = file.keep().map_err(|err| ExportError::Write {
            path: temp_dir.clone(),
            source: err.error,
        })?;

        tracing::info!(path = %path.display(), "opening preview in browser");
        if let Err(err) = self.launcher.open(&path) {
            tracing::warn!(path = %path.display(), error = %err, "browser launch failed");
        }
        Ok(path)
    }

    /// Write a paginated PDF snapshot of the live preview's displayed HTML.
    ///
    /// Page-snapshot semantics: no navigation is reconstructed; the input is
    /// whatever the preview pane currently shows. `None` destination means
    /// the save prompt was dismissed.
    pub fn export_pdf(
        &self,
        preview_html: &str,
        options: &PdfOptions,
        dest: Option<&Path>,
    ) -> Result<ExportOutcome, ExportError> {
        let Some(dest) = dest else {
            tracing::debug!("destination selection dismissed; pdf export cancelled");
            return Ok(ExportOutcome::Cancelled);
        };

        let bytes = hap_pdf::render_snapshot(preview_html, options)?;
        write_atomic(dest, &bytes)?;
        tracing::info!(path = %dest.display(), bytes = bytes.len(), "exported pdf");
        Ok(ExportOutcome::Written(dest.to_path_buf()))
    }

    fn compose(&self, sections: &[Section], doc_title: &str) -> Result<String, ExportError> {
        let rendered = render_sections(sections);
        Ok(self.compositor.compose(&rendered, doc_title)?)
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `bytes` to `dest` without ever exposing a partial file.
///
/// Bytes are staged into a temporary file in the destination's directory and
/// renamed into place, so a failed write leaves the destination untouched.
fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let wrap = |source| ExportError::Write {
        path: dest.to_path_buf(),
        source,
    };

    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(wrap)?;
    staged.write_all(bytes).map_err(wrap)?;
    staged.persist(dest).map_err(|err| ExportError::Write {
        path: dest.to_path_buf(),
        source: err.error,
    })?;
    Ok(())
}
