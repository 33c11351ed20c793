//! Integration tests for the publish pipeline.
//!
//! These drive the coordinator and session against the scripted mock API and
//! pin down the submission contract: validation blocks the network, media is
//! strictly sequential and order-preserving, failures stop the plan early
//! and carry exact partial-progress state, and the draft slot is only ever
//! cleared on success.

use dubilist_posting::testing::{valid_gallery_draft, valid_jobs_draft, MockApiCall, MockListingsApi};
use dubilist_posting::{
    MediaStage, PublishError, SubmissionCoordinator, ValidationError, WizardSession,
};

#[tokio::test]
async fn test_gallery_publish_attaches_in_order_with_single_primary() {
    let api = MockListingsApi::new().with_next_listing_id(42);
    let coordinator = SubmissionCoordinator::new(api);
    let draft = valid_gallery_draft(3);

    let receipt = coordinator.publish(&draft).await.unwrap();
    assert_eq!(receipt.listing_id, 42);
    assert_eq!(receipt.images_attached, 3);

    let calls = coordinator.api().calls();
    // create, then upload+attach per file, strictly interleaved.
    assert_eq!(calls.len(), 7);
    assert!(matches!(
        &calls[0],
        MockApiCall::CreateListing { category_id: 50, .. }
    ));
    for i in 0..3 {
        assert_eq!(
            calls[1 + i * 2],
            MockApiCall::UploadImage {
                file_name: format!("photo-{i}.png"),
                folder: "listings".to_string(),
            }
        );
        assert_eq!(
            calls[2 + i * 2],
            MockApiCall::AttachImage {
                listing_id: 42,
                url: format!("https://cdn.dubilist.test/listings/photo-{i}.png"),
                order_index: i as u32,
                is_primary: i == 0,
            }
        );
    }
}

#[tokio::test]
async fn test_validation_failure_makes_no_network_calls() {
    let coordinator = SubmissionCoordinator::new(MockListingsApi::new());
    let mut draft = valid_gallery_draft(2);
    draft.common.title = String::new();

    let err = coordinator.publish(&draft).await.unwrap_err();
    assert!(matches!(
        err,
        PublishError::Validation(ValidationError::TitleRequired)
    ));
    assert!(coordinator.api().calls().is_empty());
}

#[tokio::test]
async fn test_creation_failure_aborts_before_media() {
    let api = MockListingsApi::new().with_create_failure("title too long");
    let coordinator = SubmissionCoordinator::new(api);
    let draft = valid_gallery_draft(2);

    let err = coordinator.publish(&draft).await.unwrap_err();
    match &err {
        PublishError::Creation(source) => {
            assert_eq!(source.status(), Some(422));
        }
        other => panic!("expected creation error, got {other:?}"),
    }
    assert!(err.listing_id().is_none());
    assert_eq!(coordinator.api().upload_count(), 0);
}

#[tokio::test]
async fn test_upload_failure_stops_plan_and_reports_partial_state() {
    let api = MockListingsApi::new().with_failing_upload("photo-1.png");
    let coordinator = SubmissionCoordinator::new(api);
    let draft = valid_gallery_draft(3);

    let err = coordinator.publish(&draft).await.unwrap_err();
    match err {
        PublishError::Media {
            listing_id,
            attached,
            failed_index,
            stage,
            ..
        } => {
            assert_eq!(listing_id, 1);
            assert_eq!(attached, 1);
            assert_eq!(failed_index, 1);
            assert_eq!(stage, MediaStage::Upload);
        }
        other => panic!("expected media error, got {other:?}"),
    }
    // photo-2.png was never attempted.
    assert_eq!(coordinator.api().upload_count(), 2);
    let attach_calls = coordinator
        .api()
        .calls()
        .into_iter()
        .filter(|c| matches!(c, MockApiCall::AttachImage { .. }))
        .count();
    assert_eq!(attach_calls, 1);
}

#[tokio::test]
async fn test_attach_failure_is_distinct_from_upload_failure() {
    let api = MockListingsApi::new().with_failing_attach(1);
    let coordinator = SubmissionCoordinator::new(api);
    let draft = valid_gallery_draft(3);

    let err = coordinator.publish(&draft).await.unwrap_err();
    match err {
        PublishError::Media {
            attached,
            failed_index,
            stage,
            ..
        } => {
            assert_eq!(attached, 1);
            assert_eq!(failed_index, 1);
            assert_eq!(stage, MediaStage::Attach);
        }
        other => panic!("expected media error, got {other:?}"),
    }
    // The failing file was uploaded (the attach failed); the next never started.
    assert_eq!(coordinator.api().upload_count(), 2);
}

#[tokio::test]
async fn test_attach_remaining_resumes_without_recreating() {
    let api = MockListingsApi::new().with_failing_upload("photo-1.png");
    let coordinator = SubmissionCoordinator::new(api);
    let draft = valid_gallery_draft(3);

    let err = coordinator.publish(&draft).await.unwrap_err();
    let (listing_id, attached) = match err {
        PublishError::Media {
            listing_id,
            attached,
            ..
        } => (listing_id, attached),
        other => panic!("expected media error, got {other:?}"),
    };

    coordinator.api().clear_failures();
    coordinator.api().clear_calls();

    let receipt = coordinator
        .attach_remaining(listing_id, &draft, attached)
        .await
        .unwrap();
    assert_eq!(receipt.listing_id, listing_id);
    assert_eq!(receipt.images_attached, 3);

    let calls = coordinator.api().calls();
    // No second create; order indexes continue from the attached count and
    // the primary flag is never reassigned.
    assert!(!calls
        .iter()
        .any(|c| matches!(c, MockApiCall::CreateListing { .. })));
    let attach_indexes: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            MockApiCall::AttachImage {
                order_index,
                is_primary,
                ..
            } => Some((*order_index, *is_primary)),
            _ => None,
        })
        .collect();
    assert_eq!(attach_indexes, vec![(1, false), (2, false)]);
}

#[tokio::test]
async fn test_jobs_logo_uploads_to_logo_folder_and_updates_listing() {
    let api = MockListingsApi::new().with_next_listing_id(7);
    let coordinator = SubmissionCoordinator::new(api);
    let draft = valid_jobs_draft(true);

    let receipt = coordinator.publish(&draft).await.unwrap();
    assert_eq!(receipt.images_attached, 1);

    let calls = coordinator.api().calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(
        calls[1],
        MockApiCall::UploadImage {
            file_name: "logo.png".to_string(),
            folder: "logos".to_string(),
        }
    );
    assert_eq!(
        calls[2],
        MockApiCall::AttachLogo {
            listing_id: 7,
            url: "https://cdn.dubilist.test/logos/logo.png".to_string(),
        }
    );
}

#[tokio::test]
async fn test_jobs_logo_attach_failure_is_media_error() {
    let api = MockListingsApi::new().with_failing_logo_attach();
    let coordinator = SubmissionCoordinator::new(api);
    let draft = valid_jobs_draft(true);

    let err = coordinator.publish(&draft).await.unwrap_err();
    match err {
        PublishError::Media {
            attached,
            failed_index,
            stage,
            ..
        } => {
            assert_eq!(attached, 0);
            assert_eq!(failed_index, 0);
            assert_eq!(stage, MediaStage::Attach);
        }
        other => panic!("expected media error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_jobs_publish_without_logo_makes_no_media_calls() {
    let coordinator = SubmissionCoordinator::new(MockListingsApi::new());
    let draft = valid_jobs_draft(false);

    let receipt = coordinator.publish(&draft).await.unwrap();
    assert_eq!(receipt.images_attached, 0);
    assert_eq!(coordinator.api().calls().len(), 1);
}

#[tokio::test]
async fn test_session_clears_draft_only_on_success() {
    let mut session = WizardSession::new();
    session.composer_mut().select_main_category(5).unwrap();
    {
        let common = session.composer_mut().common_mut().unwrap();
        common.title = "Bookshelf".to_string();
        common.price = Some(120.0);
    }
    session.hand_off_to_review().unwrap();

    // Failed publish leaves the staged draft intact.
    let failing = SubmissionCoordinator::new(MockListingsApi::new().with_create_failure("nope"));
    let err = session.publish(&failing).await.unwrap_err();
    assert!(matches!(err, PublishError::Creation(_)));
    assert!(session.has_staged_draft());
    assert_eq!(session.review_draft().unwrap().common.title, "Bookshelf");

    // A later successful publish clears it.
    let working = SubmissionCoordinator::new(MockListingsApi::new());
    let receipt = session.publish(&working).await.unwrap();
    assert_eq!(receipt.listing_id, 1);
    assert!(!session.has_staged_draft());
}

#[tokio::test]
async fn test_session_resume_media_clears_after_full_attach() {
    let mut session = WizardSession::new();
    session.composer_mut().select_main_category(4).unwrap();
    {
        let common = session.composer_mut().common_mut().unwrap();
        common.title = "Mountain bike".to_string();
        common.price = Some(900.0);
    }
    for i in 0..2 {
        session
            .composer_mut()
            .add_gallery_image(dubilist_posting::ImageFile::new(
                format!("bike-{i}.png"),
                "image/png",
                vec![0u8; 8],
            ))
            .unwrap();
    }
    session.hand_off_to_review().unwrap();

    let api = MockListingsApi::new().with_failing_upload("bike-1.png");
    let coordinator = SubmissionCoordinator::new(api);
    let err = session.publish(&coordinator).await.unwrap_err();
    let (listing_id, attached) = match err {
        PublishError::Media {
            listing_id,
            attached,
            ..
        } => (listing_id, attached),
        other => panic!("expected media error, got {other:?}"),
    };
    assert!(session.has_staged_draft());

    coordinator.api().clear_failures();
    let receipt = session
        .resume_media(&coordinator, listing_id, attached)
        .await
        .unwrap();
    assert_eq!(receipt.images_attached, 2);
    assert!(!session.has_staged_draft());
}
