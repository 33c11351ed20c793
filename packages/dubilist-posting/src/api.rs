//! Network seam for the submission pipeline.
//!
//! The coordinator only ever talks to the backend through [`ListingsApi`],
//! so tests drive the full publish sequence against the in-crate mock and
//! production wires in [`DubilistClient`].

use async_trait::async_trait;
use dubilist_api::{
    AttachImageRequest, CreateListingRequest, CreatedListing, DubilistClient, ListingId,
    UpdateListingRequest, UploadData,
};

use crate::draft::ImageFile;

/// The subset of the backend the submission pipeline needs.
#[async_trait]
pub trait ListingsApi: Send + Sync {
    /// Create the listing row; media is attached separately.
    async fn create_listing(
        &self,
        req: &CreateListingRequest,
    ) -> dubilist_api::Result<CreatedListing>;

    /// Upload one image file; `folder` is a storage path hint.
    async fn upload_image(&self, file: &ImageFile, folder: &str)
        -> dubilist_api::Result<UploadData>;

    /// Record an uploaded image against a listing at a gallery position.
    async fn attach_image(
        &self,
        listing_id: ListingId,
        req: &AttachImageRequest,
    ) -> dubilist_api::Result<()>;

    /// Record an uploaded logo URL on a jobs listing.
    async fn attach_logo(&self, listing_id: ListingId, url: &str) -> dubilist_api::Result<()>;
}

#[async_trait]
impl ListingsApi for DubilistClient {
    async fn create_listing(
        &self,
        req: &CreateListingRequest,
    ) -> dubilist_api::Result<CreatedListing> {
        DubilistClient::create_listing(self, req).await
    }

    async fn upload_image(
        &self,
        file: &ImageFile,
        folder: &str,
    ) -> dubilist_api::Result<UploadData> {
        DubilistClient::upload_image(
            self,
            &file.file_name,
            &file.content_type,
            file.bytes.clone(),
            folder,
        )
        .await
    }

    async fn attach_image(
        &self,
        listing_id: ListingId,
        req: &AttachImageRequest,
    ) -> dubilist_api::Result<()> {
        self.add_listing_image(listing_id, req).await
    }

    async fn attach_logo(&self, listing_id: ListingId, url: &str) -> dubilist_api::Result<()> {
        let update = UpdateListingRequest {
            logo_url: Some(url.to_string()),
            ..UpdateListingRequest::default()
        };
        DubilistClient::update_listing(self, listing_id, &update)
            .await
            .map(|_| ())
    }
}
