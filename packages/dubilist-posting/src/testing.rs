//! Testing utilities including a mock listings API.
//!
//! Useful for exercising the submission pipeline without a backend: the mock
//! records every call in order and can be scripted to fail at exact points,
//! so partial-failure behavior is fully testable.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use dubilist_api::{
    ApiError, AttachImageRequest, CategoryId, CreateListingRequest, CreatedListing, ListingId,
    UploadData,
};

use crate::api::ListingsApi;
use crate::composer::DraftComposer;
use crate::draft::{CategoryDetails, ImageFile, ListingDraft};

/// A mock listings API for testing.
///
/// Successful by default: create hands out sequential ids and uploads return
/// deterministic URLs derived from the file name. Failures are opt-in per
/// call site.
#[derive(Default)]
pub struct MockListingsApi {
    /// Next id handed out by create
    next_listing_id: Arc<RwLock<ListingId>>,

    /// When set, create_listing fails with this message
    create_failure: Arc<RwLock<Option<String>>>,

    /// File names whose upload fails
    failing_uploads: Arc<RwLock<HashSet<String>>>,

    /// Gallery order indexes whose attach fails
    failing_attaches: Arc<RwLock<HashSet<u32>>>,

    /// Whether the jobs logo attach fails
    fail_logo_attach: Arc<RwLock<bool>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockApiCall>>>,
}

/// Record of a call made to the mock API.
#[derive(Debug, Clone, PartialEq)]
pub enum MockApiCall {
    CreateListing {
        title: String,
        category_id: CategoryId,
    },
    UploadImage {
        file_name: String,
        folder: String,
    },
    AttachImage {
        listing_id: ListingId,
        url: String,
        order_index: u32,
        is_primary: bool,
    },
    AttachLogo {
        listing_id: ListingId,
        url: String,
    },
}

impl MockListingsApi {
    /// Create a mock that succeeds everywhere, handing out ids from 1.
    pub fn new() -> Self {
        Self {
            next_listing_id: Arc::new(RwLock::new(1)),
            ..Default::default()
        }
    }

    /// Set the id the next create call returns.
    pub fn with_next_listing_id(self, id: ListingId) -> Self {
        *self.next_listing_id.write().unwrap() = id;
        self
    }

    /// Make create_listing fail.
    pub fn with_create_failure(self, message: impl Into<String>) -> Self {
        *self.create_failure.write().unwrap() = Some(message.into());
        self
    }

    /// Make uploads of the given file name fail.
    pub fn with_failing_upload(self, file_name: impl Into<String>) -> Self {
        self.failing_uploads.write().unwrap().insert(file_name.into());
        self
    }

    /// Make the gallery attach at the given order index fail.
    pub fn with_failing_attach(self, order_index: u32) -> Self {
        self.failing_attaches.write().unwrap().insert(order_index);
        self
    }

    /// Make the jobs logo attach fail.
    pub fn with_failing_logo_attach(self) -> Self {
        *self.fail_logo_attach.write().unwrap() = true;
        self
    }

    /// Remove all scripted failures (for resume-after-failure tests).
    pub fn clear_failures(&self) {
        *self.create_failure.write().unwrap() = None;
        self.failing_uploads.write().unwrap().clear();
        self.failing_attaches.write().unwrap().clear();
        *self.fail_logo_attach.write().unwrap() = false;
    }

    /// All calls made to this mock, in order.
    pub fn calls(&self) -> Vec<MockApiCall> {
        self.calls.read().unwrap().clone()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }

    /// Number of upload calls seen so far.
    pub fn upload_count(&self) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, MockApiCall::UploadImage { .. }))
            .count()
    }

    fn record(&self, call: MockApiCall) {
        self.calls.write().unwrap().push(call);
    }

    fn scripted(what: &str) -> ApiError {
        ApiError::Api {
            status: 500,
            message: format!("scripted {what} failure"),
        }
    }
}

#[async_trait]
impl ListingsApi for MockListingsApi {
    async fn create_listing(
        &self,
        req: &CreateListingRequest,
    ) -> dubilist_api::Result<CreatedListing> {
        self.record(MockApiCall::CreateListing {
            title: req.title.clone(),
            category_id: req.category_id,
        });
        if let Some(message) = self.create_failure.read().unwrap().clone() {
            return Err(ApiError::Api {
                status: 422,
                message,
            });
        }
        let mut next = self.next_listing_id.write().unwrap();
        let id = *next;
        *next += 1;
        Ok(CreatedListing { id })
    }

    async fn upload_image(
        &self,
        file: &ImageFile,
        folder: &str,
    ) -> dubilist_api::Result<UploadData> {
        self.record(MockApiCall::UploadImage {
            file_name: file.file_name.clone(),
            folder: folder.to_string(),
        });
        if self.failing_uploads.read().unwrap().contains(&file.file_name) {
            return Err(Self::scripted("upload"));
        }
        Ok(UploadData {
            url: format!("https://cdn.dubilist.test/{}/{}", folder, file.file_name),
            key: format!("{}/{}", folder, file.file_name),
        })
    }

    async fn attach_image(
        &self,
        listing_id: ListingId,
        req: &AttachImageRequest,
    ) -> dubilist_api::Result<()> {
        self.record(MockApiCall::AttachImage {
            listing_id,
            url: req.url.clone(),
            order_index: req.order_index,
            is_primary: req.is_primary,
        });
        if self.failing_attaches.read().unwrap().contains(&req.order_index) {
            return Err(Self::scripted("attach"));
        }
        Ok(())
    }

    async fn attach_logo(&self, listing_id: ListingId, url: &str) -> dubilist_api::Result<()> {
        self.record(MockApiCall::AttachLogo {
            listing_id,
            url: url.to_string(),
        });
        if *self.fail_logo_attach.read().unwrap() {
            return Err(Self::scripted("logo attach"));
        }
        Ok(())
    }
}

/// A publishable gallery draft with `files` staged images, built through the
/// composer the way the wizard would.
pub fn valid_gallery_draft(files: usize) -> ListingDraft {
    let mut composer = DraftComposer::new();
    composer.select_main_category(5).unwrap();
    composer.select_sub_category(50).unwrap();
    {
        let common = composer.common_mut().unwrap();
        common.title = "Solid oak dining table".to_string();
        common.description = Some("Seats six, light wear".to_string());
        common.price = Some(450.0);
        common.city = Some("Dubai".to_string());
    }
    if let CategoryDetails::Furniture(item) = composer.details_mut().unwrap() {
        item.condition = Some("Used".to_string());
        item.material = Some("Oak".to_string());
    }
    for i in 0..files {
        composer
            .add_gallery_image(ImageFile::new(
                format!("photo-{i}.png"),
                "image/png",
                vec![0u8; 16],
            ))
            .unwrap();
    }
    composer.snapshot().unwrap()
}

/// A publishable jobs draft, optionally with a staged logo.
pub fn valid_jobs_draft(with_logo: bool) -> ListingDraft {
    let mut composer = DraftComposer::new();
    composer.select_main_category(6).unwrap();
    composer.select_sub_category(60).unwrap();
    composer.common_mut().unwrap().title = "Backend engineer".to_string();
    if let CategoryDetails::Jobs(jobs) = composer.details_mut().unwrap() {
        jobs.company_name = Some("Acme Logistics".to_string());
        jobs.skills_required = "Rust\nPostgres".to_string();
    }
    if with_logo {
        composer
            .set_logo(ImageFile::new("logo.png", "image/png", vec![0u8; 16]))
            .unwrap();
    }
    composer.snapshot().unwrap()
}
