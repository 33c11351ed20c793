//! The submission coordinator: draft in, published listing out.
//!
//! One publish attempt walks a fixed sequence — validate, create the listing
//! row, then work through an explicit media plan strictly in order:
//!
//! ```text
//! IDLE -> VALIDATING -> [invalid: surfaced error, no network]
//! VALIDATING -> CREATING_LISTING -> [API error: FAILED, nothing created]
//! CREATING_LISTING -> UPLOADING_MEDIA (sequential, gallery order)
//! UPLOADING_MEDIA -> ATTACHING_MEDIA (one round-trip per file)
//! ATTACHING_MEDIA -> DONE | FAILED (first error stops the plan)
//! ```
//!
//! A media failure leaves the listing live with everything attached so far;
//! the error carries enough to resume with [`SubmissionCoordinator::attach_remaining`]
//! instead of recreating the listing.

use dubilist_api::{AttachImageRequest, ListingId};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::ListingsApi;
use crate::draft::{DraftMedia, ImageFile, ListingDraft};
use crate::error::{MediaStage, PublishError, PublishResult, ValidationError};
use crate::payload::build_create_request;

/// Storage folder hint for gallery uploads.
const FOLDER_LISTINGS: &str = "listings";
/// Storage folder hint for company logo uploads.
const FOLDER_LOGOS: &str = "logos";

/// Proof of a completed publish attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    /// Id of the created listing.
    pub listing_id: ListingId,
    /// Images live on the listing after this attempt.
    pub images_attached: u32,
    /// Correlation id carried by the attempt's log lines.
    pub attempt_id: Uuid,
}

/// Where an uploaded file gets recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MediaTarget {
    /// Attached as a gallery row with order index and primary flag.
    Gallery,
    /// Recorded as the listing's logo URL via an update call.
    Logo,
}

/// One pending upload of a publish attempt, in gallery order.
#[derive(Debug, Clone, Copy)]
struct PlannedMedia<'a> {
    /// Absolute position in the draft's media (0 = primary image).
    index: usize,
    file: &'a ImageFile,
    target: MediaTarget,
}

/// Ordered list of uploads still owed to the listing, skipping the first
/// `already_attached` entries.
fn media_plan(draft: &ListingDraft, already_attached: u32) -> Vec<PlannedMedia<'_>> {
    match draft.media() {
        DraftMedia::Gallery(files) => files
            .iter()
            .enumerate()
            .skip(already_attached as usize)
            .map(|(index, file)| PlannedMedia {
                index,
                file,
                target: MediaTarget::Gallery,
            })
            .collect(),
        DraftMedia::Logo(Some(file)) if already_attached == 0 => vec![PlannedMedia {
            index: 0,
            file,
            target: MediaTarget::Logo,
        }],
        DraftMedia::Logo(_) => Vec::new(),
    }
}

/// Submission-readiness rules, checked before any network call: title
/// non-empty, price present and positive for every category except jobs.
pub fn validate(draft: &ListingDraft) -> Result<(), ValidationError> {
    if draft.common.title.trim().is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if draft.main_category().requires_price() {
        match draft.common.price {
            None => return Err(ValidationError::PriceRequired),
            Some(price) if price <= 0.0 => {
                return Err(ValidationError::PriceNotPositive { price })
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Drives publish attempts against a [`ListingsApi`]. The only component
/// that performs IO during submission.
pub struct SubmissionCoordinator<A: ListingsApi> {
    api: A,
}

impl<A: ListingsApi> SubmissionCoordinator<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// The underlying API implementation.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Publish a draft end to end: validate, create, upload and attach all
    /// media in order. Returns a receipt on full success.
    ///
    /// On failure the error names the exact stage reached; the caller's
    /// draft is never touched.
    pub async fn publish(&self, draft: &ListingDraft) -> PublishResult<PublishReceipt> {
        let attempt_id = Uuid::new_v4();
        info!(
            %attempt_id,
            category = %draft.main_category(),
            files = draft.media().file_count(),
            "Starting publish attempt"
        );

        validate(draft)?;

        let request = build_create_request(draft);
        let created = self
            .api
            .create_listing(&request)
            .await
            .map_err(PublishError::Creation)?;
        info!(%attempt_id, listing_id = created.id, "Listing created, starting media");

        let images_attached = self
            .run_media_plan(created.id, draft, 0, attempt_id)
            .await?;
        info!(
            %attempt_id,
            listing_id = created.id,
            images_attached,
            "Publish complete"
        );
        Ok(PublishReceipt {
            listing_id: created.id,
            images_attached,
            attempt_id,
        })
    }

    /// Resume the media phase of a listing whose publish stopped part-way.
    ///
    /// Re-runs only the missing uploads, continuing `orderIndex` from
    /// `already_attached`; the listing row is never recreated. The primary
    /// flag can only be assigned when nothing was attached before.
    pub async fn attach_remaining(
        &self,
        listing_id: ListingId,
        draft: &ListingDraft,
        already_attached: u32,
    ) -> PublishResult<PublishReceipt> {
        let attempt_id = Uuid::new_v4();
        info!(
            %attempt_id,
            listing_id,
            already_attached,
            remaining = media_plan(draft, already_attached).len(),
            "Resuming media attachment"
        );

        let images_attached = self
            .run_media_plan(listing_id, draft, already_attached, attempt_id)
            .await?;
        info!(%attempt_id, listing_id, images_attached, "Media attachment complete");
        Ok(PublishReceipt {
            listing_id,
            images_attached,
            attempt_id,
        })
    }

    /// Process the media plan strictly sequentially, stopping at the first
    /// failed upload or attach. Returns the total attached count.
    async fn run_media_plan(
        &self,
        listing_id: ListingId,
        draft: &ListingDraft,
        already_attached: u32,
        attempt_id: Uuid,
    ) -> PublishResult<u32> {
        let mut attached = already_attached;

        for item in media_plan(draft, already_attached) {
            let folder = match item.target {
                MediaTarget::Gallery => FOLDER_LISTINGS,
                MediaTarget::Logo => FOLDER_LOGOS,
            };
            debug!(
                %attempt_id,
                listing_id,
                index = item.index,
                file = %item.file.file_name,
                folder,
                "Uploading image"
            );
            let upload = self
                .api
                .upload_image(item.file, folder)
                .await
                .map_err(|source| {
                    warn!(%attempt_id, listing_id, index = item.index, %source, "Image upload failed");
                    PublishError::Media {
                        listing_id,
                        attached,
                        failed_index: item.index,
                        stage: MediaStage::Upload,
                        source,
                    }
                })?;

            let attach_result = match item.target {
                MediaTarget::Gallery => {
                    let req = AttachImageRequest {
                        url: upload.url,
                        key: Some(upload.key),
                        order_index: item.index as u32,
                        is_primary: item.index == 0,
                    };
                    self.api.attach_image(listing_id, &req).await
                }
                MediaTarget::Logo => self.api.attach_logo(listing_id, &upload.url).await,
            };
            attach_result.map_err(|source| {
                warn!(%attempt_id, listing_id, index = item.index, %source, "Image attach failed");
                PublishError::Media {
                    listing_id,
                    attached,
                    failed_index: item.index,
                    stage: MediaStage::Attach,
                    source,
                }
            })?;

            attached += 1;
        }

        Ok(attached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{CategoryDetails, ImageFile, JobsDetails};
    use crate::taxonomy::MainCategory;

    fn gallery_draft(files: usize) -> ListingDraft {
        let mut draft = ListingDraft::new(MainCategory::Furniture);
        draft.common.title = "Dining table".to_string();
        draft.common.price = Some(450.0);
        draft.media = DraftMedia::Gallery(
            (0..files)
                .map(|i| ImageFile::new(format!("{i}.png"), "image/png", vec![0u8; 4]))
                .collect(),
        );
        draft
    }

    #[test]
    fn test_validate_requires_title() {
        let mut draft = gallery_draft(0);
        draft.common.title = "   ".to_string();
        assert_eq!(validate(&draft), Err(ValidationError::TitleRequired));
    }

    #[test]
    fn test_validate_requires_positive_price_except_jobs() {
        let mut draft = gallery_draft(0);
        draft.common.price = None;
        assert_eq!(validate(&draft), Err(ValidationError::PriceRequired));

        draft.common.price = Some(0.0);
        assert_eq!(
            validate(&draft),
            Err(ValidationError::PriceNotPositive { price: 0.0 })
        );

        let mut jobs = ListingDraft::new(MainCategory::Jobs);
        jobs.common.title = "Backend engineer".to_string();
        jobs.details = CategoryDetails::Jobs(JobsDetails::default());
        jobs.common.price = None;
        assert_eq!(validate(&jobs), Ok(()));
    }

    #[test]
    fn test_media_plan_preserves_order_and_skip() {
        let draft = gallery_draft(4);
        let plan = media_plan(&draft, 0);
        assert_eq!(plan.iter().map(|p| p.index).collect::<Vec<_>>(), vec![0, 1, 2, 3]);

        let resumed = media_plan(&draft, 2);
        assert_eq!(resumed.iter().map(|p| p.index).collect::<Vec<_>>(), vec![2, 3]);
        assert!(resumed.iter().all(|p| matches!(p.target, MediaTarget::Gallery)));
    }

    #[test]
    fn test_media_plan_logo_shape() {
        let mut draft = ListingDraft::new(MainCategory::Jobs);
        draft.media = DraftMedia::Logo(Some(ImageFile::new("logo.png", "image/png", vec![1u8])));

        let plan = media_plan(&draft, 0);
        assert_eq!(plan.len(), 1);
        assert!(matches!(plan[0].target, MediaTarget::Logo));

        // A logo already recorded leaves nothing to do.
        assert!(media_plan(&draft, 1).is_empty());

        draft.media = DraftMedia::Logo(None);
        assert!(media_plan(&draft, 0).is_empty());
    }
}
