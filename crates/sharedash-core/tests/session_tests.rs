//! End-to-end upload session scenarios against an in-process server.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use tempfile::TempDir;

use sharedash_core::api::ApiClient;
use sharedash_core::notify::{NotificationQueue, ToastKind};
use sharedash_core::revert::{Accent, ControlHandle, TimedRevert};
use sharedash_core::session::{
    idle_zone_presentation, FileSource, SessionState, TransferSession, UploadDefaults,
    ZONE_IDLE_LABEL,
};

use common::{create_test_file, spawn_server, CountingRefresh};

struct Harness {
    session: TransferSession,
    zone: ControlHandle,
    toasts: NotificationQueue,
    refresher: Arc<CountingRefresh>,
}

fn build_harness(base_url: &str) -> Harness {
    let zone = ControlHandle::new(idle_zone_presentation());
    let toasts = NotificationQueue::new();
    let refresher = Arc::new(CountingRefresh::default());
    let session = TransferSession::new(
        ApiClient::new(base_url),
        UploadDefaults::default(),
        zone.clone(),
        toasts.clone(),
        TimedRevert::new(),
        Arc::clone(&refresher) as Arc<dyn sharedash_core::refresh::PageRefresh>,
    );
    Harness {
        session,
        zone,
        toasts,
        refresher,
    }
}

#[tokio::test]
async fn successful_upload_end_to_end() {
    let (base_url, server) = spawn_server(StatusCode::OK, StatusCode::OK).await;
    let dir = TempDir::new().expect("tempdir");
    let path = create_test_file(dir.path(), "hundred.bin", &[0x78; 100]);

    let harness = build_harness(&base_url);
    let progress = harness.session.progress();
    let file = FileSource::open(&path).await.expect("open");

    let outcome = harness.session.start(file).await;

    assert_eq!(outcome.state, SessionState::Succeeded);
    assert_eq!(outcome.link.as_deref(), Some("/f/abc"));

    let terminal = progress.borrow().clone();
    assert_eq!(terminal.state, SessionState::Succeeded);
    assert_eq!(terminal.percentage(), Some(100.0));

    let toasts = harness.toasts.active();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].text, "File uploaded successfully!");
    assert_eq!(toasts[0].kind, ToastKind::Success);

    // The zone keeps the progress presentation; the refresh replaces it.
    assert!(harness.zone.presentation().label.starts_with("Uploading:"));

    let uploads = server.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].file_name.as_deref(), Some("hundred.bin"));
    assert_eq!(uploads[0].file_bytes.len(), 100);
    assert_eq!(uploads[0].fields.get("expiration_days").map(String::as_str), Some("7"));
    assert_eq!(uploads[0].fields.get("downloads_limit").map(String::as_str), Some("0"));
    assert_eq!(uploads[0].fields.get("require_auth").map(String::as_str), Some("false"));

    // Refresh is scheduled, not immediate: the toast gets its moment first.
    assert_eq!(harness.refresher.count(), 0);
    tokio::time::sleep(Duration::from_millis(1300)).await;
    assert_eq!(harness.refresher.count(), 1);
}

#[tokio::test]
async fn progress_is_ordered_and_reaches_completion() {
    let (base_url, _server) = spawn_server(StatusCode::OK, StatusCode::OK).await;
    let dir = TempDir::new().expect("tempdir");
    let path = create_test_file(dir.path(), "large.bin", &vec![0x2a; 256 * 1024]);

    let harness = build_harness(&base_url);
    let mut rx = harness.session.progress();
    let observer = tokio::spawn(async move {
        let mut seen = Vec::new();
        loop {
            if rx.changed().await.is_err() {
                break;
            }
            let snapshot = rx.borrow_and_update().clone();
            if let Some(pct) = snapshot.percentage() {
                seen.push(pct);
            }
            if matches!(snapshot.state, SessionState::Succeeded | SessionState::Failed) {
                break;
            }
        }
        seen
    });

    let file = FileSource::open(&path).await.expect("open");
    let outcome = harness.session.start(file).await;
    assert_eq!(outcome.state, SessionState::Succeeded);

    let seen = observer.await.expect("observer");
    assert!(!seen.is_empty());
    assert!(
        seen.windows(2).all(|w| w[0] <= w[1]),
        "progress must be applied in arrival order: {seen:?}"
    );
    assert!((seen.last().copied().expect("non-empty") - 100.0).abs() < f64::EPSILON);
    assert!(seen.iter().all(|pct| (0.0..=100.0).contains(pct)));
}

#[tokio::test]
async fn server_error_resets_zone_after_delay() {
    let (base_url, _server) = spawn_server(StatusCode::INTERNAL_SERVER_ERROR, StatusCode::OK).await;
    let dir = TempDir::new().expect("tempdir");
    let path = create_test_file(dir.path(), "doomed.bin", b"payload");

    let harness = build_harness(&base_url);
    let progress = harness.session.progress();
    let file = FileSource::open(&path).await.expect("open");

    let outcome = harness.session.start(file).await;
    assert_eq!(outcome.state, SessionState::Failed);
    assert!(outcome.link.is_none());

    let terminal = progress.borrow().clone();
    assert_eq!(terminal.state, SessionState::Failed);
    assert_eq!(
        terminal.error.as_deref(),
        Some("Upload failed: Internal Server Error")
    );

    let toasts = harness.toasts.active();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].text, "Upload failed: Internal Server Error");
    assert_eq!(toasts[0].kind, ToastKind::Error);

    // Failure context stays visible briefly, then the idle affordance is
    // restored and no refresh ever fires.
    let failed = harness.zone.presentation();
    assert_eq!(failed.label, "Upload failed");
    assert_eq!(failed.accent, Accent::Error);

    tokio::time::sleep(Duration::from_millis(2200)).await;
    assert_eq!(harness.zone.presentation().label, ZONE_IDLE_LABEL);
    assert_eq!(harness.refresher.count(), 0);
}

#[tokio::test]
async fn unreachable_server_reports_generic_failure() {
    let dir = TempDir::new().expect("tempdir");
    let path = create_test_file(dir.path(), "lost.bin", b"payload");

    // Nothing listens here; the request never completes.
    let harness = build_harness("http://127.0.0.1:9");
    let file = FileSource::open(&path).await.expect("open");

    let outcome = harness.session.start(file).await;
    assert_eq!(outcome.state, SessionState::Failed);

    let toasts = harness.toasts.active();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].text, "Upload failed");
    assert_eq!(toasts[0].kind, ToastKind::Error);
}

#[tokio::test]
async fn unknown_total_degrades_without_failing() {
    let (base_url, server) = spawn_server(StatusCode::OK, StatusCode::OK).await;
    let dir = TempDir::new().expect("tempdir");
    let path = create_test_file(dir.path(), "stream.bin", &[0x11; 4096]);

    let harness = build_harness(&base_url);
    let progress = harness.session.progress();
    let file = FileSource::open(&path).await.expect("open").with_unknown_size();

    let outcome = harness.session.start(file).await;
    assert_eq!(outcome.state, SessionState::Succeeded);

    // The indicator never advanced, but the transfer itself is fine.
    let terminal = progress.borrow().clone();
    assert_eq!(terminal.percentage(), None);
    assert_eq!(server.uploads()[0].file_bytes.len(), 4096);
}
