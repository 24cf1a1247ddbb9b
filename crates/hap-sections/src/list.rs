//! Ordered, never-empty section collection.

use crate::Section;

/// The ordered collection of sections the editor mutates.
///
/// The list is never empty: constructing one seeds a single placeholder
/// section, and removing the last remaining section refills it. Downstream
/// consumers (renderer, compositor, export driver) therefore always receive
/// a non-empty snapshot.
///
/// All positional arguments are ordinal indices. Out-of-range indices on
/// mutating operations are ignored rather than panicking — the callers are
/// UI event handlers that may race stale state.
#[derive(Clone, Debug)]
pub struct SectionList {
    sections: Vec<Section>,
}

impl SectionList {
    /// Create a list containing the single placeholder section.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sections: vec![Section::placeholder()],
        }
    }

    /// Create a list from existing sections.
    ///
    /// An empty input collapses to the placeholder list.
    #[must_use]
    pub fn from_sections(sections: Vec<Section>) -> Self {
        if sections.is_empty() {
            Self::new()
        } else {
            Self { sections }
        }
    }

    /// Number of sections. Always at least 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always `false`; present for API symmetry with standard collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Borrow a section by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Mutably borrow a section by index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index)
    }

    /// Iterate sections in order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Append a section at the end.
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Insert a section at `index`, clamped to the end.
    pub fn insert(&mut self, index: usize, section: Section) {
        let index = index.min(self.sections.len());
        self.sections.insert(index, section);
    }

    /// Remove the section at `index`.
    ///
    /// Removing the last remaining section refills the placeholder so the
    /// list stays non-empty. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<Section> {
        if index >= self.sections.len() {
            return None;
        }
        let removed = self.sections.remove(index);
        if self.sections.is_empty() {
            self.sections.push(Section::placeholder());
        }
        Some(removed)
    }

    /// Duplicate the section at `index`, inserting the copy directly after it.
    ///
    /// The copy's title gets a `" (Copy)"` suffix. Returns the index of the
    /// new section.
    pub fn duplicate(&mut self, index: usize) -> Option<usize> {
        let original = self.sections.get(index)?;
        let copy = Section::new(format!("{} (Copy)", original.title), original.content.clone());
        self.sections.insert(index + 1, copy);
        Some(index + 1)
    }

    /// Rename the section at `index`. Blank names are ignored.
    pub fn rename(&mut self, index: usize, title: &str) {
        let title = title.trim();
        if title.is_empty() {
            return;
        }
        if let Some(section) = self.sections.get_mut(index) {
            section.title = title.to_owned();
        }
    }

    /// Move the section at `from` so it ends up at position `to`.
    ///
    /// No-op when either index is out of range or the indices are equal.
    pub fn reorder(&mut self, from: usize, to: usize) {
        let len = self.sections.len();
        if from == to || from >= len || to >= len {
            return;
        }
        let moved = self.sections.remove(from);
        self.sections.insert(to, moved);
    }

    /// Take an owned snapshot of the current sections in order.
    ///
    /// The snapshot is fully decoupled from the list: export and preview
    /// operate on it and never observe later mutation.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Section> {
        self.sections.clone()
    }
}

impl Default for SectionList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn list_of(titles: &[&str]) -> SectionList {
        SectionList::from_sections(
            titles.iter().map(|t| Section::new(*t, format!("# {t}"))).collect(),
        )
    }

    fn titles(list: &SectionList) -> Vec<&str> {
        list.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_new_list_has_placeholder() {
        let list = SectionList::new();
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().title, "Untitled");
    }

    #[test]
    fn test_from_empty_collapses_to_placeholder() {
        let list = SectionList::from_sections(Vec::new());
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().title, "Untitled");
    }

    #[test]
    fn test_remove_last_refills_placeholder() {
        let mut list = list_of(&["Only"]);
        let removed = list.remove(0).unwrap();
        assert_eq!(removed.title, "Only");
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().title, "Untitled");
    }

    #[test]
    fn test_remove_out_of_range_ignored() {
        let mut list = list_of(&["A", "B"]);
        assert!(list.remove(5).is_none());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_duplicate_inserts_after_with_copy_suffix() {
        let mut list = list_of(&["A", "B"]);
        let new_index = list.duplicate(0).unwrap();
        assert_eq!(new_index, 1);
        assert_eq!(titles(&list), vec!["A", "A (Copy)", "B"]);
        assert_eq!(list.get(1).unwrap().content, list.get(0).unwrap().content);
    }

    #[test]
    fn test_rename_trims_and_ignores_blank() {
        let mut list = list_of(&["A"]);
        list.rename(0, "  New Title  ");
        assert_eq!(list.get(0).unwrap().title, "New Title");
        list.rename(0, "   ");
        assert_eq!(list.get(0).unwrap().title, "New Title");
    }

    #[test]
    fn test_reorder_moves_forward_and_back() {
        let mut list = list_of(&["A", "B", "C"]);
        list.reorder(0, 2);
        assert_eq!(titles(&list), vec!["B", "C", "A"]);
        list.reorder(2, 0);
        assert_eq!(titles(&list), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_reorder_out_of_range_is_noop() {
        let mut list = list_of(&["A", "B"]);
        list.reorder(0, 9);
        list.reorder(9, 0);
        assert_eq!(titles(&list), vec!["A", "B"]);
    }

    #[test]
    fn test_snapshot_is_decoupled() {
        let mut list = list_of(&["A"]);
        let snapshot = list.snapshot();
        list.rename(0, "Changed");
        list.push(Section::new("B", ""));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].title, "A");
    }
}
