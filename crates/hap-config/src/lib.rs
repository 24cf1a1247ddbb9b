//! Persisted editor settings for hap.
//!
//! The surrounding application saves and restores a small set of UI
//! preferences between sessions: sidebar width, recent files, the auto-save
//! flag, the pinned-sidebar flag, and the light-mode flag. Settings live in
//! a TOML file; every field has a default, so a missing or partial file is
//! never fatal to the editor ([`Settings::load_or_default`]).
//!
//! The export pipeline itself neither reads nor writes settings.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Upper bound on the recent-files list.
const MAX_RECENT_FILES: usize = 10;

/// Persisted editor settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sidebar width in pixels.
    pub sidebar_width: u32,
    /// Recently opened files, most recent first.
    pub recent_files: Vec<PathBuf>,
    /// Save automatically a short delay after edits.
    pub auto_save: bool,
    /// Keep the sidebar at a fixed width.
    pub pinned_sidebar: bool,
    /// Start the editor in light mode.
    pub light_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sidebar_width: 300,
            recent_files: Vec::new(),
            auto_save: false,
            pinned_sidebar: false,
            light_mode: false,
        }
    }
}

/// Error returned when settings cannot be loaded or saved.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Settings file does not exist.
    #[error("settings file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// File could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// File is not valid TOML for this schema.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Settings could not be serialized.
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Settings {
    /// Load settings from `path`.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Err(SettingsError::NotFound(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// unreadable. The editor must always start, even with broken settings.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            tracing::debug!(path = %path.display(), error = %err, "using default settings");
            Self::default()
        })
    }

    /// Write settings to `path` as TOML.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let toml = toml::to_string_pretty(self)?;
        fs::write(path, toml)?;
        Ok(())
    }

    /// Record `path` as the most recently opened file.
    ///
    /// Duplicates move to the front; the list is capped at ten entries.
    pub fn remember_file(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.recent_files.retain(|existing| *existing != path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.sidebar_width, 300);
        assert!(settings.recent_files.is_empty());
        assert!(!settings.auto_save);
        assert!(!settings.pinned_sidebar);
        assert!(!settings.light_mode);
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut settings = Settings {
            sidebar_width: 250,
            auto_save: true,
            ..Settings::default()
        };
        settings.remember_file("/tmp/project.json");
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "sidebar_width = 420\n").unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.sidebar_width, 420);
        assert!(!loaded.auto_save);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = Settings::load(Path::new("/nonexistent/settings.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::NotFound(_)));
    }

    #[test]
    fn test_load_or_default_tolerates_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "not = [valid").unwrap();

        let settings = Settings::load_or_default(&path);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_remember_file_dedups_and_caps() {
        let mut settings = Settings::default();
        for i in 0..12 {
            settings.remember_file(format!("/p/{i}"));
        }
        settings.remember_file("/p/5");

        assert_eq!(settings.recent_files.len(), 10);
        assert_eq!(settings.recent_files[0], PathBuf::from("/p/5"));
        assert_eq!(settings.recent_files[1], PathBuf::from("/p/11"));
        // No duplicate left behind.
        assert_eq!(
            settings
                .recent_files
                .iter()
                .filter(|p| **p == PathBuf::from("/p/5"))
                .count(),
            1
        );
    }
}
