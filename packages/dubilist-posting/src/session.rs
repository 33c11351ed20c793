//! One wizard session: compose, review, publish.
//!
//! A session is an explicitly passed, scoped object owning one composer and
//! one store — created when the posting flow is entered, dropped when it
//! ends. Single logical writer; plain `&mut` mutation, no locking.

use dubilist_api::ListingId;
use tracing::info;

use crate::api::ListingsApi;
use crate::composer::DraftComposer;
use crate::draft::ListingDraft;
use crate::error::{ComposeError, ComposeResult, PublishError, PublishResult};
use crate::publish::{validate, PublishReceipt, SubmissionCoordinator};
use crate::store::DraftStore;

/// State for one run of the posting wizard.
#[derive(Debug, Default)]
pub struct WizardSession {
    composer: DraftComposer,
    store: DraftStore,
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn composer(&self) -> &DraftComposer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut DraftComposer {
        &mut self.composer
    }

    /// Whether a snapshot is staged for review.
    pub fn has_staged_draft(&self) -> bool {
        self.store.has_draft()
    }

    /// Validate the live draft and stage a snapshot of it for review.
    /// Returns the staged copy for rendering.
    pub fn hand_off_to_review(&mut self) -> ComposeResult<ListingDraft> {
        let snapshot = self.composer.snapshot()?;
        validate(&snapshot)?;
        self.store.set_draft(&snapshot);
        info!(
            category = %snapshot.main_category(),
            files = snapshot.media().file_count(),
            "Draft staged for review"
        );
        Ok(snapshot)
    }

    /// Copy of the staged snapshot for the review screen. An empty slot is
    /// an error — review never renders an empty form.
    pub fn review_draft(&self) -> ComposeResult<ListingDraft> {
        self.store.get_draft().ok_or(ComposeError::NoDraft)
    }

    /// Re-enter composition with the staged snapshot loaded, so edits start
    /// from what was reviewed.
    pub fn back_to_compose(&mut self) -> ComposeResult<()> {
        let draft = self.store.get_draft().ok_or(ComposeError::NoDraft)?;
        self.composer.load_draft(draft);
        Ok(())
    }

    /// Publish the staged snapshot. The slot is cleared only on success;
    /// any failure leaves the session exactly as it was.
    pub async fn publish<A: ListingsApi>(
        &mut self,
        coordinator: &SubmissionCoordinator<A>,
    ) -> PublishResult<PublishReceipt> {
        let draft = self
            .store
            .get_draft()
            .ok_or_else(|| PublishError::Unexpected("no draft staged for review".to_string()))?;
        let receipt = coordinator.publish(&draft).await?;
        self.finish();
        Ok(receipt)
    }

    /// Resume the media phase after a partial publish failure, using the
    /// still-staged snapshot. Clears the session once everything is attached.
    pub async fn resume_media<A: ListingsApi>(
        &mut self,
        coordinator: &SubmissionCoordinator<A>,
        listing_id: ListingId,
        already_attached: u32,
    ) -> PublishResult<PublishReceipt> {
        let draft = self
            .store
            .get_draft()
            .ok_or_else(|| PublishError::Unexpected("no draft staged for review".to_string()))?;
        let receipt = coordinator
            .attach_remaining(listing_id, &draft, already_attached)
            .await?;
        self.finish();
        Ok(receipt)
    }

    /// Drop all session state (the user navigated away).
    pub fn abandon(&mut self) {
        self.composer.clear();
        self.store.clear_draft();
    }

    // Post-success teardown: the wizard is over.
    fn finish(&mut self) {
        self.store.clear_draft();
        self.composer.clear();
    }
}
