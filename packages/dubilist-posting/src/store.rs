//! Single-slot draft store bridging the compose and review steps.

use crate::draft::ListingDraft;

/// Holds at most one draft snapshot. Review reads from here, never from the
/// live composer, so later form edits cannot alter what was reviewed.
#[derive(Debug, Default)]
pub struct DraftStore {
    slot: Option<ListingDraft>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an owned copy of `draft`. The slot is independent of the
    /// caller's value; image bytes are shared (they are immutable).
    pub fn set_draft(&mut self, draft: &ListingDraft) {
        self.slot = Some(draft.clone());
    }

    /// Copy of the stored snapshot, or `None` when the slot is empty.
    /// Each call returns an independent files vector.
    pub fn get_draft(&self) -> Option<ListingDraft> {
        self.slot.clone()
    }

    pub fn has_draft(&self) -> bool {
        self.slot.is_some()
    }

    /// Empty the slot. Called exactly once per successful publish, never on
    /// failure.
    pub fn clear_draft(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{DraftMedia, ImageFile};
    use crate::taxonomy::MainCategory;

    #[test]
    fn test_round_trip_returns_equal_draft() {
        let mut draft = ListingDraft::new(MainCategory::Electronics);
        draft.common.title = "iPad mini".to_string();

        let mut store = DraftStore::new();
        store.set_draft(&draft);
        assert_eq!(store.get_draft().unwrap(), draft);
    }

    #[test]
    fn test_snapshot_survives_source_mutation() {
        let mut draft = ListingDraft::new(MainCategory::Furniture);
        draft.common.title = "Bookshelf".to_string();

        let mut store = DraftStore::new();
        store.set_draft(&draft);
        draft.common.title = "changed after set".to_string();

        assert_eq!(store.get_draft().unwrap().common.title, "Bookshelf");
    }

    #[test]
    fn test_returned_files_are_independent() {
        let mut draft = ListingDraft::new(MainCategory::Furniture);
        draft.media = DraftMedia::Gallery(vec![ImageFile::new(
            "sofa.png",
            "image/png",
            vec![1u8, 2, 3],
        )]);
        let mut store = DraftStore::new();
        store.set_draft(&draft);

        let mut first = store.get_draft().unwrap();
        if let DraftMedia::Gallery(files) = &mut first.media {
            files.clear();
        }
        // A second read still sees the original file.
        assert_eq!(store.get_draft().unwrap().media().file_count(), 1);
    }

    #[test]
    fn test_clear_empties_slot() {
        let mut store = DraftStore::new();
        store.set_draft(&ListingDraft::new(MainCategory::Motors));
        assert!(store.has_draft());
        store.clear_draft();
        assert!(store.get_draft().is_none());
    }
}
