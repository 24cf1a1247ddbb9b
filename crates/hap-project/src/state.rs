//! Document state, dirty signaling, and project file I/O.

use std::fs;
use std::path::{Path, PathBuf};

use hap_sections::{Section, SectionList};

/// Callback informed of dirty-flag transitions.
type DirtyObserver = Box<dyn Fn(bool) + Send>;

/// Error returned when opening or saving a project fails.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// File could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Project file is not a valid section array.
    #[error("project parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The mutable state of the open document, owned by the editor controller.
pub struct DocumentState {
    list: SectionList,
    current: usize,
    doc_title: Option<String>,
    file_path: Option<PathBuf>,
    dirty: bool,
    observers: Vec<DirtyObserver>,
}

impl std::fmt::Debug for DocumentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentState")
            .field("list", &self.list)
            .field("current", &self.current)
            .field("doc_title", &self.doc_title)
            .field("file_path", &self.file_path)
            .field("dirty", &self.dirty)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl DocumentState {
    /// Fresh document with a single empty "Introduction" section.
    #[must_use]
    pub fn new() -> Self {
        Self {
            list: SectionList::from_sections(vec![Section::new("Introduction", "")]),
            current: 0,
            doc_title: None,
            file_path: None,
            dirty: false,
            observers: Vec::new(),
        }
    }

    /// Open a project or markdown file.
    ///
    /// `.json` files are parsed as a section array (an empty array collapses
    /// to the placeholder list); anything else loads as a single section
    /// titled by the file name. A freshly opened document is not dirty.
    pub fn open(path: &Path) -> Result<Self, ProjectError> {
        let raw = fs::read_to_string(path)?;
        let is_project = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let list = if is_project {
            let sections: Vec<Section> = serde_json::from_str(&raw)?;
            tracing::debug!(path = %path.display(), sections = sections.len(), "opened project");
            SectionList::from_sections(sections)
        } else {
            let title = path
                .file_name()
                .map_or_else(|| "Untitled".to_owned(), |n| n.to_string_lossy().into_owned());
            SectionList::from_sections(vec![Section::new(title, raw)])
        };

        Ok(Self {
            list,
            current: 0,
            doc_title: None,
            file_path: Some(path.to_path_buf()),
            dirty: false,
            observers: Vec::new(),
        })
    }

    /// Save the document to `path`.
    ///
    /// A single-section document saved to a `.md`/`.markdown` path is
    /// written as raw markdown; everything else becomes a JSON project.
    /// Saving clears the dirty flag.
    pub fn save(&mut self, path: &Path) -> Result<(), ProjectError> {
        let as_markdown = self.list.len() == 1
            && path.extension().is_some_and(|ext| {
                ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown")
            });

        if as_markdown {
            let section = self.list.get(0).expect("list is never empty");
            fs::write(path, &section.content)?;
        } else {
            let json = serde_json::to_string_pretty(&self.list.snapshot())?;
            fs::write(path, json)?;
        }
        tracing::debug!(path = %path.display(), "saved project");

        self.file_path = Some(path.to_path_buf());
        self.set_dirty(false);
        Ok(())
    }

    /// Path the document was last opened from or saved to.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// The ordered section list.
    #[must_use]
    pub fn sections(&self) -> &SectionList {
        &self.list
    }

    /// Index of the section being edited.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The section being edited.
    #[must_use]
    pub fn current_section(&self) -> &Section {
        self.list.get(self.current).expect("current index in range")
    }

    /// Switch to the section at `index`. Out-of-range requests are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.list.len() {
            self.current = index;
        }
    }

    /// Document title used for export, if the author set one.
    #[must_use]
    pub fn doc_title(&self) -> Option<&str> {
        self.doc_title.as_deref()
    }

    /// Set or clear the export document title.
    pub fn set_doc_title(&mut self, title: Option<String>) {
        self.doc_title = title;
        self.set_dirty(true);
    }

    /// Replace the current section's markdown source.
    pub fn edit_current(&mut self, content: impl Into<String>) {
        if let Some(section) = self.list.get_mut(self.current) {
            section.content = content.into();
        }
        self.set_dirty(true);
    }

    /// Append a new empty section and switch to it.
    pub fn add_section(&mut self) {
        let title = format!("Section {}", self.list.len() + 1);
        self.list.push(Section::new(title, ""));
        self.current = self.list.len() - 1;
        self.set_dirty(true);
    }

    /// Rename the section at `index`.
    pub fn rename_section(&mut self, index: usize, title: &str) {
        self.list.rename(index, title);
        self.set_dirty(true);
    }

    /// Duplicate the section at `index` and switch to the copy.
    pub fn duplicate_section(&mut self, index: usize) {
        if let Some(new_index) = self.list.duplicate(index) {
            self.current = new_index;
            self.set_dirty(true);
        }
    }

    /// Remove the section at `index`, keeping the current index on the same
    /// section where possible.
    pub fn remove_section(&mut self, index: usize) {
        if self.list.remove(index).is_none() {
            return;
        }
        if index <= self.current && self.current > 0 {
            self.current -= 1;
        }
        self.current = self.current.min(self.list.len() - 1);
        self.set_dirty(true);
    }

    /// Move a section from `from` to `to`, carrying the current selection
    /// along with the moved or displaced sections.
    pub fn reorder_section(&mut self, from: usize, to: usize) {
        let len = self.list.len();
        if from == to || from >= len || to >= len {
            return;
        }
        self.list.reorder(from, to);
        if from == self.current {
            self.current = to;
        } else if from < self.current && to >= self.current {
            self.current -= 1;
        } else if from > self.current && to <= self.current {
            self.current += 1;
        }
        self.set_dirty(true);
    }

    /// Immutable snapshot of the section list for export or preview.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Section> {
        self.list.snapshot()
    }

    /// Whether the document has unsaved changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Register an observer informed of every dirty-flag transition, in
    /// registration order.
    pub fn on_dirty_change(&mut self, observer: impl Fn(bool) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn set_dirty(&mut self, dirty: bool) {
        if self.dirty == dirty {
            return;
        }
        self.dirty = dirty;
        for observer in &self.observers {
            observer(dirty);
        }
    }
}

impl Default for DocumentState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;

    use super::*;

    fn state_of(titles: &[&str]) -> DocumentState {
        let mut state = DocumentState::new();
        state.list = SectionList::from_sections(
            titles.iter().map(|t| Section::new(*t, "")).collect(),
        );
        state
    }

    #[test]
    fn test_new_document_not_dirty() {
        let state = DocumentState::new();
        assert!(!state.is_dirty());
        assert_eq!(state.current_section().title, "Introduction");
    }

    #[test]
    fn test_edit_marks_dirty() {
        let mut state = DocumentState::new();
        state.edit_current("# changed");
        assert!(state.is_dirty());
        assert_eq!(state.current_section().content, "# changed");
    }

    #[test]
    fn test_observers_informed_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut state = DocumentState::new();
        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            state.on_dirty_change(move |dirty| {
                seen.lock().unwrap().push((tag, dirty));
            });
        }

        state.edit_current("x");
        // No transition, no notification.
        state.edit_current("y");

        assert_eq!(
            *seen.lock().unwrap(),
            vec![("first", true), ("second", true)]
        );
    }

    #[test]
    fn test_save_clears_dirty_and_notifies() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let dir = tempfile::tempdir().unwrap();

        let mut state = DocumentState::new();
        let seen_clone = Arc::clone(&seen);
        state.on_dirty_change(move |dirty| seen_clone.lock().unwrap().push(dirty));

        state.edit_current("# body");
        state.save(&dir.path().join("project.json")).unwrap();

        assert!(!state.is_dirty());
        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_project_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.json");

        let mut state = state_of(&["One", "Two"]);
        state.edit_current("# One body");
        state.save(&path).unwrap();

        let reopened = DocumentState::open(&path).unwrap();
        assert!(!reopened.is_dirty());
        assert_eq!(reopened.sections().len(), 2);
        assert_eq!(reopened.sections().get(0).unwrap().content, "# One body");
        assert_eq!(reopened.file_path(), Some(path.as_path()));
    }

    #[test]
    fn test_open_markdown_as_single_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.md");
        fs::write(&path, "# Guide\n\ntext").unwrap();

        let state = DocumentState::open(&path).unwrap();
        assert_eq!(state.sections().len(), 1);
        assert_eq!(state.current_section().title, "guide.md");
        assert_eq!(state.current_section().content, "# Guide\n\ntext");
    }

    #[test]
    fn test_save_single_section_as_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.md");

        let mut state = DocumentState::new();
        state.edit_current("raw markdown body");
        state.save(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "raw markdown body");
    }

    #[test]
    fn test_open_empty_project_gets_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "[]").unwrap();

        let state = DocumentState::open(&path).unwrap();
        assert_eq!(state.sections().len(), 1);
        assert_eq!(state.current_section().title, "Untitled");
    }

    #[test]
    fn test_open_invalid_project_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let err = DocumentState::open(&path).unwrap_err();
        assert!(matches!(err, ProjectError::Parse(_)));
    }

    #[test]
    fn test_remove_keeps_selection_stable() {
        let mut state = state_of(&["A", "B", "C"]);
        state.select(2);
        state.remove_section(0);
        assert_eq!(state.current_section().title, "C");

        state.remove_section(1);
        assert_eq!(state.current_section().title, "B");
    }

    #[test]
    fn test_remove_last_section_selects_placeholder() {
        let mut state = state_of(&["Only"]);
        state.remove_section(0);
        assert_eq!(state.sections().len(), 1);
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.current_section().title, "Untitled");
    }

    #[test]
    fn test_duplicate_switches_to_copy() {
        let mut state = state_of(&["A", "B"]);
        state.duplicate_section(0);
        assert_eq!(state.current_index(), 1);
        assert_eq!(state.current_section().title, "A (Copy)");
    }

    #[test]
    fn test_reorder_follows_moved_section() {
        let mut state = state_of(&["A", "B", "C"]);
        state.select(0);
        state.reorder_section(0, 2);
        assert_eq!(state.current_index(), 2);
        assert_eq!(state.current_section().title, "A");
    }

    #[test]
    fn test_reorder_displaces_selection() {
        let mut state = state_of(&["A", "B", "C"]);
        state.select(1);
        state.reorder_section(2, 0);
        assert_eq!(state.current_section().title, "B");
    }

    #[test]
    fn test_select_out_of_range_ignored() {
        let mut state = state_of(&["A", "B"]);
        state.select(5);
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn test_add_section_numbered_and_selected() {
        let mut state = DocumentState::new();
        state.add_section();
        assert_eq!(state.sections().len(), 2);
        assert_eq!(state.current_section().title, "Section 2");
    }

    #[test]
    fn test_snapshot_decoupled_from_state() {
        let mut state = state_of(&["A"]);
        let snapshot = state.snapshot();
        state.edit_current("mutated");
        assert_eq!(snapshot[0].content, "");
    }
}
