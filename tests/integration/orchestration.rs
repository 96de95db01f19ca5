//! Integration tests for fan-out orchestration through the API

use admock::error::GENERIC_GENERATION_MESSAGE;
use admock::gallery::CardState;
use admock::progress::{ProgressBus, ProgressEvent};
use admock::{
    AdFormatSpec, Catalog, DispatchMode, GenerationOrchestrator, GenerationStatus, MockupApi,
    SessionStore,
};
use std::sync::Arc;

use crate::integration::{api_with, config_with, ScriptedGenerator};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nproduct";

#[tokio::test]
async fn test_result_keys_match_catalog() {
    let catalog = Catalog::builtin();
    let generator = Arc::new(ScriptedGenerator::new(&catalog));
    let api = api_with(generator, DispatchMode::Sequential);

    api.upload_bytes("image/png", PNG).await.unwrap();

    let snapshot = api.snapshot();
    let keys: Vec<u32> = snapshot.results.iter().map(|r| r.format_id).collect();
    assert_eq!(keys, catalog.ids());
    assert!(snapshot.all_terminal());
    assert!(!snapshot.in_flight);
}

#[tokio::test]
async fn test_sequential_dispatch_is_ordered_and_serial() {
    let catalog = Catalog::builtin();
    let generator = Arc::new(ScriptedGenerator::new(&catalog));
    let api = api_with(generator.clone(), DispatchMode::Sequential);

    let summary = api.upload_bytes("image/jpeg", PNG).await.unwrap();

    assert_eq!(summary.succeeded, 10);
    assert_eq!(generator.calls(), catalog.ids());
    assert_eq!(generator.max_active(), 1);
}

#[tokio::test]
async fn test_concurrent_dispatch_issues_every_call_at_once() {
    let catalog = Catalog::builtin();
    let generator = Arc::new(ScriptedGenerator::new(&catalog));
    let api = api_with(generator.clone(), DispatchMode::Concurrent);

    let summary = api.upload_bytes("image/png", PNG).await.unwrap();

    assert_eq!(summary.succeeded, 10);
    assert_eq!(generator.max_active(), 10);
    let mut calls = generator.calls();
    calls.sort_unstable();
    assert_eq!(calls, catalog.ids());
}

#[tokio::test]
async fn test_single_failure_is_isolated() {
    for dispatch in [DispatchMode::Sequential, DispatchMode::Concurrent] {
        let catalog = Catalog::builtin();
        let generator = Arc::new(ScriptedGenerator::new(&catalog).no_image(3));
        let api = api_with(generator.clone(), dispatch);

        let summary = api.upload_bytes("image/png", PNG).await.unwrap();
        assert_eq!(summary.succeeded, 9);
        assert_eq!(summary.failed, 1);
        assert_eq!(generator.calls().len(), 10);

        let snapshot = api.snapshot();
        assert_eq!(snapshot.count(GenerationStatus::Succeeded), 9);
        let failed = snapshot.result(3).unwrap();
        assert_eq!(failed.status, GenerationStatus::Failed);
        assert_eq!(failed.error.as_deref(), Some(GENERIC_GENERATION_MESSAGE));
        assert!(snapshot.global_error.is_none());

        let gallery = api.gallery();
        assert!(gallery.visible);
        assert_eq!(
            gallery.card(3).unwrap().state,
            CardState::Failed {
                message: GENERIC_GENERATION_MESSAGE.to_string()
            }
        );
        assert!(gallery.card(4).unwrap().can_zoom());
    }
}

#[tokio::test]
async fn test_all_failures_still_finish_session() {
    let catalog = Catalog::builtin();
    let mut generator = ScriptedGenerator::new(&catalog);
    for id in catalog.ids() {
        generator = generator.fail(id, "");
    }
    let api = api_with(Arc::new(generator), DispatchMode::Concurrent);

    let summary = api.upload_bytes("image/png", PNG).await.unwrap();
    assert_eq!(summary.failed, 10);

    let snapshot = api.snapshot();
    assert!(!snapshot.in_flight);
    assert!(snapshot
        .results
        .iter()
        .all(|r| r.error.as_deref() == Some("Generation failed")));
}

#[tokio::test]
async fn test_custom_catalog_size() {
    let catalog = Catalog::new(vec![
        AdFormatSpec::new(42, "Stadium Screen", "Show the product on a stadium screen."),
        AdFormatSpec::new(7, "Postcard", "Print the product on a vintage postcard."),
        AdFormatSpec::new(19, "Storefront", "Put the product in a storefront window."),
    ])
    .unwrap();
    let generator = Arc::new(ScriptedGenerator::new(&catalog).fail(7, "quota exceeded"));
    let api = MockupApi::new(
        generator.clone(),
        Arc::new(catalog),
        &config_with(DispatchMode::Sequential),
    );

    let summary = api.upload_bytes("image/webp", PNG).await.unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(generator.calls(), vec![42, 7, 19]);

    let gallery = api.gallery();
    let labels: Vec<&str> = gallery.cards.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Stadium Screen", "Postcard", "Storefront"]);
}

#[tokio::test]
async fn test_progress_stream_matches_store() {
    let catalog = Arc::new(Catalog::builtin());
    let generator = Arc::new(ScriptedGenerator::new(&catalog).fail(5, "quota exceeded"));
    let (bus, mut rx) = ProgressBus::new_pair();
    let orchestrator = GenerationOrchestrator::new(
        generator,
        SessionStore::new(catalog.clone()),
        DispatchMode::Sequential,
    )
    .with_progress(bus);

    let image = admock::EncodedImage::new("cHJvZHVjdA==", "image/png");
    let summary = orchestrator.run(image).await;

    let mut envelopes = Vec::new();
    while let Ok(envelope) = rx.try_recv() {
        envelopes.push(envelope);
    }
    assert_eq!(envelopes.len(), 12);
    assert!(envelopes.windows(2).all(|w| w[0].seq < w[1].seq));
    assert!(envelopes.iter().all(|e| e.event.session() == summary.token));

    let item_ids: Vec<u32> = envelopes
        .iter()
        .filter_map(|e| e.event.format_id())
        .collect();
    assert_eq!(item_ids, catalog.ids());

    let failed: Vec<&ProgressEvent> = envelopes
        .iter()
        .map(|e| &e.event)
        .filter(|e| matches!(e, ProgressEvent::ItemFailed { .. }))
        .collect();
    assert_eq!(failed.len(), 1);
    assert!(matches!(
        failed[0],
        ProgressEvent::ItemFailed { format_id: 5, message, .. } if message == "quota exceeded"
    ));
}
