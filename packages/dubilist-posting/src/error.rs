//! Typed errors for the posting pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to keep the failure
//! taxonomy strongly typed: composition errors never touch the network,
//! validation errors block it, and publish errors say exactly how far an
//! attempt got before it stopped.

use dubilist_api::{ApiError, ListingId};
use thiserror::Error;

/// Errors raised while composing a draft, before anything is submitted.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Field or media access before a main category was picked
    #[error("no category chosen yet")]
    CategoryNotChosen,

    /// Id is not a known main category
    #[error("unknown category: {id}")]
    UnknownCategory { id: i64 },

    /// Sub-category exists but belongs to a different main category
    #[error("sub-category {sub} does not belong to category {main}")]
    SubCategoryMismatch { sub: i64, main: i64 },

    /// Gallery already holds the maximum number of images
    #[error("gallery is full ({limit} images)")]
    GalleryFull { limit: usize },

    /// Content type is not an accepted image format
    #[error("unsupported image type: {0}")]
    UnsupportedImageType(String),

    /// Gallery operation on a logo draft, or logo operation on a gallery draft
    #[error("{op} does not apply to a {category} draft")]
    MediaShape {
        op: &'static str,
        category: &'static str,
    },

    /// Gallery index out of range
    #[error("no image at index {index} (gallery has {len})")]
    NoSuchImage { index: usize, len: usize },

    /// Review or publish attempted with an empty draft slot
    #[error("no draft available")]
    NoDraft,

    /// Draft failed submission-readiness checks
    #[error("draft is not publishable: {0}")]
    Invalid(#[from] ValidationError),
}

/// Submission-readiness failures. Surfaced inline in the form; the draft is
/// preserved and nothing is sent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("title is required")]
    TitleRequired,

    #[error("price is required")]
    PriceRequired,

    #[error("price must be greater than zero (got {price})")]
    PriceNotPositive { price: f64 },
}

/// Which half of a media round-trip failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaStage {
    /// The multipart upload itself
    Upload,
    /// Recording the uploaded URL against the listing
    Attach,
}

impl std::fmt::Display for MediaStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaStage::Upload => write!(f, "upload"),
            MediaStage::Attach => write!(f, "attach"),
        }
    }
}

/// Errors from a publish attempt. The variant tells the caller exactly what
/// exists server-side afterwards.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Draft failed validation; no network call was made
    #[error("draft is not publishable: {0}")]
    Validation(#[from] ValidationError),

    /// Listing creation failed; nothing exists server-side
    #[error("listing creation failed: {0}")]
    Creation(#[source] ApiError),

    /// Listing exists but the media pipeline stopped part-way through.
    /// Images `0..attached` are live; `failed_index` and later are not.
    #[error("media {stage} failed for listing {listing_id} at image {failed_index}: {source}")]
    Media {
        listing_id: ListingId,
        attached: u32,
        failed_index: usize,
        stage: MediaStage,
        source: ApiError,
    },

    /// Anything outside the taxonomy above; the draft is never cleared
    #[error("unexpected publish failure: {0}")]
    Unexpected(String),
}

impl PublishError {
    /// Listing id, if the attempt got far enough to create one.
    pub fn listing_id(&self) -> Option<ListingId> {
        match self {
            PublishError::Media { listing_id, .. } => Some(*listing_id),
            _ => None,
        }
    }

    /// True when the listing exists and only media is missing; such attempts
    /// can be resumed with `attach_remaining` instead of re-publishing.
    pub fn is_media_failure(&self) -> bool {
        matches!(self, PublishError::Media { .. })
    }
}

/// Result type alias for composition operations.
pub type ComposeResult<T> = std::result::Result<T, ComposeError>;

/// Result type alias for publish operations.
pub type PublishResult<T> = std::result::Result<T, PublishError>;
