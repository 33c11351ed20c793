//! The in-memory listing draft.
//!
//! A draft lives entirely in client memory for the duration of one wizard
//! session: created when a main category is picked, mutated on edits,
//! snapshotted for review, destroyed only after a confirmed publish. There is
//! no persistence — dropping the session loses the draft.
//!
//! The category-specific data is a tagged union ([`CategoryDetails`]), so a
//! draft can never disagree with its own category and a furniture draft has
//! no job fields to leak into a payload. Media shape is structural too:
//! non-jobs drafts hold an ordered gallery, jobs drafts hold a single
//! optional logo, never both.

use bytes::Bytes;
use dubilist_api::CategoryId;

use crate::taxonomy::{self, MainCategory, SubCategory};

/// Gallery size cap, matching the backend's per-listing image limit.
pub const MAX_GALLERY_IMAGES: usize = 5;

/// Content types the upload endpoint accepts.
pub const ACCEPTED_IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp"];

/// An image staged for upload, held fully in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    /// Cloning shares the underlying buffer; snapshots stay cheap.
    pub bytes: Bytes,
}

impl ImageFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Whether the file's content type is one the backend accepts.
    pub fn is_accepted_type(&self) -> bool {
        ACCEPTED_IMAGE_TYPES.contains(&self.content_type.as_str())
    }
}

/// Fields shared by every category. These survive a category switch.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonFields {
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: String,
    pub negotiable: bool,
    pub city: Option<String>,
    pub neighbourhood: Option<String>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub show_phone: bool,
    pub company_website: Option<String>,
}

impl Default for CommonFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            price: None,
            currency: "AED".to_string(),
            negotiable: false,
            city: None,
            neighbourhood: None,
            contact_name: None,
            phone: None,
            show_phone: false,
            company_website: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotorsDetails {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub kilometres: Option<u32>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElectronicsDetails {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub condition: Option<String>,
    pub storage: Option<String>,
    pub colour: Option<String>,
    /// Device type ("Mobiles", "Laptops", ...)
    pub device_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyDetails {
    pub sale_type: Option<String>,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area: Option<String>,
    pub furnishing: Option<String>,
    pub amenities: Vec<String>,
}

/// Shared shape for classifieds and furniture items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDetails {
    pub condition: Option<String>,
    pub material: Option<String>,
    pub length_cm: Option<f64>,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub weight: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobsDetails {
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub industry: Option<String>,
    /// Copied from the sub-category name on selection ("Full-time", ...)
    pub job_type: Option<String>,
    pub experience: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub job_description: Option<String>,
    /// Multi-line form text; split into one skill per line at submission.
    pub skills_required: String,
    /// Multi-line form text; split into one entry per line at submission.
    pub responsibilities: String,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
}

/// Category-specific draft data, one variant per main category.
///
/// The variant *is* the main category: there is no separate id field to fall
/// out of sync with the fields being edited.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryDetails {
    Motors(MotorsDetails),
    Electronics(ElectronicsDetails),
    Property(PropertyDetails),
    Classifieds(ItemDetails),
    Furniture(ItemDetails),
    Jobs(JobsDetails),
}

impl CategoryDetails {
    /// Empty details for a freshly selected category.
    pub fn default_for(category: MainCategory) -> Self {
        match category {
            MainCategory::Motors => CategoryDetails::Motors(MotorsDetails::default()),
            MainCategory::Electronics => CategoryDetails::Electronics(ElectronicsDetails::default()),
            MainCategory::Property => CategoryDetails::Property(PropertyDetails::default()),
            MainCategory::Classifieds => CategoryDetails::Classifieds(ItemDetails::default()),
            MainCategory::Furniture => CategoryDetails::Furniture(ItemDetails::default()),
            MainCategory::Jobs => CategoryDetails::Jobs(JobsDetails::default()),
        }
    }

    /// The main category this variant belongs to.
    pub fn category(&self) -> MainCategory {
        match self {
            CategoryDetails::Motors(_) => MainCategory::Motors,
            CategoryDetails::Electronics(_) => MainCategory::Electronics,
            CategoryDetails::Property(_) => MainCategory::Property,
            CategoryDetails::Classifieds(_) => MainCategory::Classifieds,
            CategoryDetails::Furniture(_) => MainCategory::Furniture,
            CategoryDetails::Jobs(_) => MainCategory::Jobs,
        }
    }
}

/// A draft's attached media. The shape is picked by category at selection
/// time; exactly one shape exists at any moment.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftMedia {
    /// Ordered photo gallery (non-jobs). Index 0 becomes the primary image.
    Gallery(Vec<ImageFile>),
    /// Single company logo slot (jobs).
    Logo(Option<ImageFile>),
}

impl DraftMedia {
    /// The empty media shape for a category.
    pub fn default_for(category: MainCategory) -> Self {
        if category.uses_logo() {
            DraftMedia::Logo(None)
        } else {
            DraftMedia::Gallery(Vec::new())
        }
    }

    /// Gallery view, `None` for logo drafts.
    pub fn gallery(&self) -> Option<&[ImageFile]> {
        match self {
            DraftMedia::Gallery(files) => Some(files),
            DraftMedia::Logo(_) => None,
        }
    }

    /// Logo view, `None` for gallery drafts or an empty slot.
    pub fn logo(&self) -> Option<&ImageFile> {
        match self {
            DraftMedia::Gallery(_) => None,
            DraftMedia::Logo(slot) => slot.as_ref(),
        }
    }

    /// Number of files staged for upload.
    pub fn file_count(&self) -> usize {
        match self {
            DraftMedia::Gallery(files) => files.len(),
            DraftMedia::Logo(slot) => usize::from(slot.is_some()),
        }
    }
}

/// A listing in the making.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    pub common: CommonFields,
    pub(crate) sub_category_id: Option<CategoryId>,
    pub(crate) details: CategoryDetails,
    pub(crate) media: DraftMedia,
}

impl ListingDraft {
    /// Fresh draft for a main category: empty common fields, default details,
    /// and the category's media shape.
    pub fn new(category: MainCategory) -> Self {
        Self {
            common: CommonFields::default(),
            sub_category_id: None,
            details: CategoryDetails::default_for(category),
            media: DraftMedia::default_for(category),
        }
    }

    /// Main category, derived from the details variant.
    pub fn main_category(&self) -> MainCategory {
        self.details.category()
    }

    pub fn sub_category_id(&self) -> Option<CategoryId> {
        self.sub_category_id
    }

    /// Resolved sub-category entry, when one is selected.
    pub fn sub_category(&self) -> Option<&'static SubCategory> {
        self.sub_category_id.and_then(taxonomy::sub_category)
    }

    /// Category id sent on the wire: the sub-category when selected,
    /// otherwise the main category.
    pub fn effective_category_id(&self) -> CategoryId {
        self.sub_category_id
            .unwrap_or_else(|| self.main_category().id())
    }

    pub fn details(&self) -> &CategoryDetails {
        &self.details
    }

    pub fn media(&self) -> &DraftMedia {
        &self.media
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_has_category_shape() {
        let draft = ListingDraft::new(MainCategory::Furniture);
        assert_eq!(draft.main_category(), MainCategory::Furniture);
        assert!(matches!(draft.media(), DraftMedia::Gallery(files) if files.is_empty()));
        assert!(matches!(draft.details(), CategoryDetails::Furniture(_)));

        let jobs = ListingDraft::new(MainCategory::Jobs);
        assert!(matches!(jobs.media(), DraftMedia::Logo(None)));
    }

    #[test]
    fn test_effective_category_id_prefers_sub() {
        let mut draft = ListingDraft::new(MainCategory::Motors);
        assert_eq!(draft.effective_category_id(), 1);
        draft.sub_category_id = Some(10);
        assert_eq!(draft.effective_category_id(), 10);
        assert_eq!(draft.sub_category().unwrap().name, "Cars");
    }

    #[test]
    fn test_accepted_image_types() {
        let png = ImageFile::new("a.png", "image/png", vec![1u8, 2, 3]);
        assert!(png.is_accepted_type());
        let gif = ImageFile::new("a.gif", "image/gif", vec![1u8]);
        assert!(!gif.is_accepted_type());
    }

    #[test]
    fn test_image_clone_shares_bytes() {
        let original = ImageFile::new("a.png", "image/png", vec![0u8; 1024]);
        let copy = original.clone();
        assert_eq!(original.bytes, copy.bytes);
        assert_eq!(copy.bytes.len(), 1024);
    }
}
