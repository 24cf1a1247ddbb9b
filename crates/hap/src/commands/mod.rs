//! CLI command implementations.

mod export;
mod pdf;
mod preview;

use std::path::{Path, PathBuf};

use hap_config::Settings;
use hap_project::DocumentState;

use crate::error::CliError;

pub(crate) use export::ExportArgs;
pub(crate) use pdf::PdfArgs;
pub(crate) use preview::PreviewArgs;

/// Open a project file and record it in the recent-files list.
pub(crate) fn open_project(path: &Path) -> Result<DocumentState, CliError> {
    let state = DocumentState::open(path)?;
    remember_recent(path);
    Ok(state)
}

/// Settings file location (`<config dir>/hap/settings.toml`).
fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hap").join("settings.toml"))
}

/// Update the persisted recent-files list. Settings are UI convenience;
/// failures are logged, never surfaced.
fn remember_recent(path: &Path) {
    let Some(settings_path) = settings_path() else {
        return;
    };
    let mut settings = Settings::load_or_default(&settings_path);
    settings.remember_file(path);
    if let Some(parent) = settings_path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    if let Err(err) = settings.save(&settings_path) {
        tracing::debug!(error = %err, "could not update recent files");
    }
}
