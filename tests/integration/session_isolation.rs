//! Integration tests for session supersession: reset and re-upload while
//! calls from an earlier session are still outstanding.

use admock::{DispatchMode, GenerationStatus};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::integration::{api_with, wait_until, ScriptedGenerator};

const FIRST: &[u8] = b"first product";
const SECOND: &[u8] = b"second product";

fn held_generator(gate: &Arc<Semaphore>) -> Arc<ScriptedGenerator> {
    let catalog = admock::Catalog::builtin();
    Arc::new(ScriptedGenerator::new(&catalog).hold(&BASE64.encode(FIRST), gate.clone()))
}

#[tokio::test]
async fn test_reset_discards_late_responses() {
    let gate = Arc::new(Semaphore::new(0));
    let generator = held_generator(&gate);
    let api = api_with(generator.clone(), DispatchMode::Concurrent);

    let driver = async {
        wait_until(|| generator.active() == 10).await;
        assert!(api.snapshot().in_flight);

        api.reset();
        let snapshot = api.snapshot();
        assert!(snapshot.image.is_none());
        assert_eq!(snapshot.count(GenerationStatus::Idle), 10);

        gate.add_permits(10);
    };
    let (summary, ()) = tokio::join!(api.upload_bytes("image/png", FIRST), driver);
    let summary = summary.unwrap();

    assert!(summary.superseded);
    assert_eq!(summary.completed(), 0);

    let snapshot = api.snapshot();
    assert!(snapshot.image.is_none());
    assert!(!snapshot.in_flight);
    assert_eq!(snapshot.count(GenerationStatus::Idle), 10);
    assert!(!api.gallery().visible);
}

#[tokio::test]
async fn test_reset_keeps_nothing_from_partially_finished_session() {
    let gate = Arc::new(Semaphore::new(0));
    let catalog = admock::Catalog::builtin();
    let generator = Arc::new(
        ScriptedGenerator::new(&catalog)
            .hold(&BASE64.encode(FIRST), gate.clone())
            .unheld(1),
    );
    let api = api_with(generator.clone(), DispatchMode::Concurrent);

    let driver = async {
        wait_until(|| {
            generator.active() == 9
                && api.snapshot().result(1).map(|r| r.status) == Some(GenerationStatus::Succeeded)
        })
        .await;
        let snapshot = api.snapshot();
        assert_eq!(snapshot.count(GenerationStatus::Pending), 9);
        assert!(snapshot.in_flight);

        api.reset();
        gate.add_permits(9);
    };
    let (summary, ()) = tokio::join!(api.upload_bytes("image/png", FIRST), driver);
    let summary = summary.unwrap();

    assert!(summary.superseded);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(generator.calls().len(), 10);

    let snapshot = api.snapshot();
    assert!(snapshot.image.is_none());
    assert!(!snapshot.in_flight);
    assert_eq!(snapshot.count(GenerationStatus::Idle), 10);
}

#[tokio::test]
async fn test_new_upload_supersedes_running_session() {
    let gate = Arc::new(Semaphore::new(0));
    let generator = held_generator(&gate);
    let api = api_with(generator.clone(), DispatchMode::Concurrent);

    let driver = async {
        wait_until(|| generator.active() == 10).await;
        let second = api.upload_bytes("image/jpeg", SECOND).await.unwrap();
        gate.add_permits(10);
        second
    };
    let (first, second) = tokio::join!(api.upload_bytes("image/png", FIRST), driver);
    let first = first.unwrap();

    assert!(first.superseded);
    assert_eq!(first.completed(), 0);
    assert!(!second.superseded);
    assert_eq!(second.succeeded, 10);
    assert!(second.token > first.token);

    let second_data = BASE64.encode(SECOND);
    let snapshot = api.snapshot();
    assert_eq!(snapshot.token, second.token);
    assert_eq!(snapshot.image.as_ref().unwrap().data, second_data);
    assert!(!snapshot.in_flight);
    for result in &snapshot.results {
        let image = result.image.as_ref().unwrap();
        assert_eq!(image.data, format!("{}-{}", second_data, result.format_id));
    }
}

#[tokio::test]
async fn test_sequential_run_stops_after_reset() {
    let gate = Arc::new(Semaphore::new(0));
    let generator = held_generator(&gate);
    let api = api_with(generator.clone(), DispatchMode::Sequential);

    let driver = async {
        wait_until(|| generator.active() == 1).await;
        api.reset();
        gate.add_permits(1);
    };
    let (summary, ()) = tokio::join!(api.upload_bytes("image/png", FIRST), driver);
    let summary = summary.unwrap();

    assert!(summary.superseded);
    assert_eq!(generator.calls(), vec![1]);
    assert_eq!(api.snapshot().count(GenerationStatus::Idle), 10);
}

#[tokio::test]
async fn test_invalid_upload_leaves_results_untouched() {
    let catalog = admock::Catalog::builtin();
    let generator = Arc::new(ScriptedGenerator::new(&catalog));
    let api = api_with(generator.clone(), DispatchMode::Sequential);

    let err = api.upload_bytes("application/pdf", b"%PDF-1.7").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid file type. Please upload an image.");
    assert!(generator.calls().is_empty());

    let snapshot = api.snapshot();
    assert_eq!(snapshot.count(GenerationStatus::Idle), 10);
    assert_eq!(
        snapshot.global_error.as_deref(),
        Some("Invalid file type. Please upload an image.")
    );
    assert!(!api.gallery().visible);

    // A valid upload clears the banner.
    api.upload_bytes("image/png", FIRST).await.unwrap();
    let completed = api.snapshot();
    assert!(completed.global_error.is_none());
    assert_eq!(completed.count(GenerationStatus::Succeeded), 10);

    // A later bad upload leaves the finished results in place.
    api.upload_bytes("text/plain", b"notes").await.unwrap_err();
    let after = api.snapshot();
    assert_eq!(after.results, completed.results);
    assert_eq!(after.token, completed.token);
    assert!(after.global_error.is_some());
    assert_eq!(generator.calls().len(), 10);
}
