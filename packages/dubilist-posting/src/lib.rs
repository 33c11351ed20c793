//! Listing composition and submission pipeline for the Dubilist marketplace.
//!
//! Everything between "user picks a category" and "listing is live with its
//! images": a typed draft model, gated composition, a single-slot review
//! hand-off, and a submission coordinator that creates the listing and then
//! uploads and attaches media strictly in order, with a failure taxonomy
//! that says exactly how far an attempt got.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dubilist_api::DubilistClient;
//! use dubilist_posting::{SubmissionCoordinator, WizardSession};
//!
//! let mut session = WizardSession::new();
//! session.composer_mut().select_main_category(5)?;  // Furniture
//! session.composer_mut().common_mut()?.title = "Oak dining table".into();
//! session.composer_mut().common_mut()?.price = Some(450.0);
//!
//! session.hand_off_to_review()?;
//!
//! let client = DubilistClient::from_env().with_token(token);
//! let coordinator = SubmissionCoordinator::new(client);
//! let receipt = session.publish(&coordinator).await?;
//! println!("listing {} live with {} images", receipt.listing_id, receipt.images_attached);
//! ```
//!
//! # Modules
//!
//! - [`taxonomy`] - The fixed two-level category tables
//! - [`draft`] - The in-memory draft model (tagged per-category details)
//! - [`composer`] - Gated form state and media staging
//! - [`store`] - Single-slot compose → review bridge
//! - [`session`] - One wizard run owning composer and store
//! - [`payload`] - Draft → create-listing wire body mapping
//! - [`publish`] - The submission coordinator and its media plan
//! - [`api`] - The network seam trait, implemented by `DubilistClient`
//! - [`testing`] - Mock API and draft fixtures for tests

pub mod api;
pub mod composer;
pub mod draft;
pub mod error;
pub mod payload;
pub mod publish;
pub mod session;
pub mod store;
pub mod taxonomy;
pub mod testing;

// Re-export core types at crate root
pub use api::ListingsApi;
pub use composer::DraftComposer;
pub use draft::{
    CategoryDetails, CommonFields, DraftMedia, ElectronicsDetails, ImageFile, ItemDetails,
    JobsDetails, ListingDraft, MotorsDetails, PropertyDetails, ACCEPTED_IMAGE_TYPES,
    MAX_GALLERY_IMAGES,
};
pub use error::{
    ComposeError, ComposeResult, MediaStage, PublishError, PublishResult, ValidationError,
};
pub use payload::build_create_request;
pub use publish::{validate, PublishReceipt, SubmissionCoordinator};
pub use session::WizardSession;
pub use store::DraftStore;
pub use taxonomy::{sub_categories_of, sub_category, MainCategory, SubCategory, AMENITIES};

// Re-export testing utilities
pub use testing::{MockApiCall, MockListingsApi};
