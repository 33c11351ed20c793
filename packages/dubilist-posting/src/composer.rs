//! Draft composition: category selection and gated field/media edits.
//!
//! The composer owns the live draft while the user fills the form. Every
//! field and media operation is gated on a main category being chosen —
//! the "choose a category first" contract — and category switches reset
//! everything category-specific while keeping the common fields.

use dubilist_api::CategoryId;

use crate::draft::{
    CategoryDetails, CommonFields, DraftMedia, ImageFile, ListingDraft, MAX_GALLERY_IMAGES,
};
use crate::error::{ComposeError, ComposeResult};
use crate::taxonomy::{self, MainCategory, SubCategory};

/// Form-state holder for one listing in the making.
#[derive(Debug, Default)]
pub struct DraftComposer {
    draft: Option<ListingDraft>,
}

impl DraftComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live draft, if a category has been chosen.
    pub fn draft(&self) -> Option<&ListingDraft> {
        self.draft.as_ref()
    }

    /// Active main category.
    pub fn main_category(&self) -> Option<MainCategory> {
        self.draft.as_ref().map(|d| d.main_category())
    }

    /// Pick (or switch to) a main category.
    ///
    /// Installs default details and the category's media shape, and clears
    /// any sub-category selection. Common fields survive. Re-selecting the
    /// current category resets it the same way a switch does.
    pub fn select_main_category(&mut self, id: CategoryId) -> ComposeResult<()> {
        let category =
            MainCategory::from_id(id).ok_or(ComposeError::UnknownCategory { id })?;
        let common = self
            .draft
            .take()
            .map(|d| d.common)
            .unwrap_or_default();
        self.draft = Some(ListingDraft {
            common,
            sub_category_id: None,
            details: CategoryDetails::default_for(category),
            media: DraftMedia::default_for(category),
        });
        Ok(())
    }

    /// Pick a sub-category of the active main category.
    ///
    /// For jobs, the sub-category's display name doubles as the `job_type`
    /// field ("Full-time", "Part-time", ...).
    pub fn select_sub_category(&mut self, id: CategoryId) -> ComposeResult<()> {
        let draft = self.draft.as_mut().ok_or(ComposeError::CategoryNotChosen)?;
        let sub = taxonomy::sub_category(id).ok_or(ComposeError::UnknownCategory { id })?;
        let main = draft.main_category();
        if sub.parent != main {
            return Err(ComposeError::SubCategoryMismatch {
                sub: id,
                main: main.id(),
            });
        }
        draft.sub_category_id = Some(id);
        if let CategoryDetails::Jobs(jobs) = &mut draft.details {
            jobs.job_type = Some(sub.name.to_string());
        }
        Ok(())
    }

    /// Sub-categories selectable under the active main category, in display
    /// order. Empty when no category is chosen.
    pub fn sub_category_choices(&self) -> Vec<&'static SubCategory> {
        match self.main_category() {
            Some(main) => taxonomy::sub_categories_of(main).collect(),
            None => Vec::new(),
        }
    }

    /// Mutable access to the common fields.
    pub fn common_mut(&mut self) -> ComposeResult<&mut CommonFields> {
        self.draft
            .as_mut()
            .map(|d| &mut d.common)
            .ok_or(ComposeError::CategoryNotChosen)
    }

    /// Mutable access to the category-specific details variant.
    pub fn details_mut(&mut self) -> ComposeResult<&mut CategoryDetails> {
        self.draft
            .as_mut()
            .map(|d| &mut d.details)
            .ok_or(ComposeError::CategoryNotChosen)
    }

    /// Append an image to the gallery. Rejects logo-shaped (jobs) drafts,
    /// unaccepted content types, and a full gallery.
    pub fn add_gallery_image(&mut self, file: ImageFile) -> ComposeResult<()> {
        let draft = self.draft.as_mut().ok_or(ComposeError::CategoryNotChosen)?;
        if !file.is_accepted_type() {
            return Err(ComposeError::UnsupportedImageType(file.content_type));
        }
        let category = draft.main_category().name();
        match &mut draft.media {
            DraftMedia::Gallery(files) => {
                if files.len() >= MAX_GALLERY_IMAGES {
                    return Err(ComposeError::GalleryFull {
                        limit: MAX_GALLERY_IMAGES,
                    });
                }
                files.push(file);
                Ok(())
            }
            DraftMedia::Logo(_) => Err(ComposeError::MediaShape {
                op: "gallery image",
                category,
            }),
        }
    }

    /// Remove and return the gallery image at `index`.
    pub fn remove_gallery_image(&mut self, index: usize) -> ComposeResult<ImageFile> {
        let draft = self.draft.as_mut().ok_or(ComposeError::CategoryNotChosen)?;
        let category = draft.main_category().name();
        match &mut draft.media {
            DraftMedia::Gallery(files) => {
                if index >= files.len() {
                    return Err(ComposeError::NoSuchImage {
                        index,
                        len: files.len(),
                    });
                }
                Ok(files.remove(index))
            }
            DraftMedia::Logo(_) => Err(ComposeError::MediaShape {
                op: "gallery image",
                category,
            }),
        }
    }

    /// Set (or replace) the company logo on a jobs draft.
    pub fn set_logo(&mut self, file: ImageFile) -> ComposeResult<()> {
        let draft = self.draft.as_mut().ok_or(ComposeError::CategoryNotChosen)?;
        if !file.is_accepted_type() {
            return Err(ComposeError::UnsupportedImageType(file.content_type));
        }
        let category = draft.main_category().name();
        match &mut draft.media {
            DraftMedia::Logo(slot) => {
                *slot = Some(file);
                Ok(())
            }
            DraftMedia::Gallery(_) => Err(ComposeError::MediaShape {
                op: "logo",
                category,
            }),
        }
    }

    /// Empty the logo slot.
    pub fn clear_logo(&mut self) -> ComposeResult<()> {
        let draft = self.draft.as_mut().ok_or(ComposeError::CategoryNotChosen)?;
        let category = draft.main_category().name();
        match &mut draft.media {
            DraftMedia::Logo(slot) => {
                *slot = None;
                Ok(())
            }
            DraftMedia::Gallery(_) => Err(ComposeError::MediaShape {
                op: "logo",
                category,
            }),
        }
    }

    /// Owned copy of the current draft state for hand-off.
    pub fn snapshot(&self) -> ComposeResult<ListingDraft> {
        self.draft.clone().ok_or(ComposeError::CategoryNotChosen)
    }

    /// Replace the live draft with a previously stored snapshot (re-entering
    /// the form from review).
    pub fn load_draft(&mut self, draft: ListingDraft) {
        self.draft = Some(draft);
    }

    /// Drop all form state.
    pub fn clear(&mut self) {
        self.draft = None;
    }
}
