//! Common test utilities for Sharedash integration tests.
//!
//! Provides an in-process sharing server with scriptable responses, plus
//! recording implementations of the host-side collaborator traits.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::json;

use sharedash_core::delete::Confirm;
use sharedash_core::refresh::PageRefresh;

/// One multipart upload as the server saw it.
#[derive(Debug, Clone, Default)]
pub struct RecordedUpload {
    /// Non-file form fields by name.
    pub fields: HashMap<String, String>,
    /// File name of the `file` part.
    pub file_name: Option<String>,
    /// Raw bytes of the `file` part.
    pub file_bytes: Vec<u8>,
}

/// Shared state of the scripted server.
#[derive(Clone)]
pub struct ServerState {
    /// Status to answer uploads with.
    pub upload_status: StatusCode,
    /// Status to answer deletes with.
    pub delete_status: StatusCode,
    uploads: Arc<Mutex<Vec<RecordedUpload>>>,
    delete_bodies: Arc<Mutex<Vec<String>>>,
    delete_count: Arc<AtomicUsize>,
}

impl ServerState {
    fn new(upload_status: StatusCode, delete_status: StatusCode) -> Self {
        Self {
            upload_status,
            delete_status,
            uploads: Arc::new(Mutex::new(Vec::new())),
            delete_bodies: Arc::new(Mutex::new(Vec::new())),
            delete_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Uploads recorded so far.
    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().expect("lock").clone()
    }

    /// Number of delete requests received.
    pub fn delete_count(&self) -> usize {
        self.delete_count.load(Ordering::SeqCst)
    }

    /// `file_id` values of the delete requests received.
    pub fn deleted_ids(&self) -> Vec<String> {
        self.delete_bodies.lock().expect("lock").clone()
    }
}

#[derive(Deserialize)]
struct DeleteForm {
    file_id: String,
}

async fn handle_upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut recorded = RecordedUpload::default();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            recorded.file_name = field.file_name().map(ToString::to_string);
            recorded.file_bytes = field.bytes().await.expect("file bytes").to_vec();
        } else {
            let value = field.text().await.expect("field text");
            recorded.fields.insert(name, value);
        }
    }
    state.uploads.lock().expect("lock").push(recorded);

    (state.upload_status, Json(json!({ "url": "/f/abc" })))
}

async fn handle_delete(
    State(state): State<ServerState>,
    Form(form): Form<DeleteForm>,
) -> impl IntoResponse {
    state.delete_count.fetch_add(1, Ordering::SeqCst);
    state.delete_bodies.lock().expect("lock").push(form.file_id);

    (state.delete_status, Json(json!({ "success": true })))
}

/// Start a scripted server; returns its base URL and state handle.
pub async fn spawn_server(upload_status: StatusCode, delete_status: StatusCode) -> (String, ServerState) {
    let state = ServerState::new(upload_status, delete_status);
    let app = Router::new()
        .route("/upload", post(handle_upload))
        .route("/file/delete", post(handle_delete))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    (format!("http://{addr}"), state)
}

/// `PageRefresh` that counts invocations.
#[derive(Default)]
pub struct CountingRefresh(AtomicUsize);

impl CountingRefresh {
    /// How many times the listing was refreshed.
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl PageRefresh for CountingRefresh {
    fn refresh(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// `Confirm` with a scripted answer that records prompts.
pub struct ScriptedConfirm {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    /// Answer every prompt with `answer`.
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts presented so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("lock").clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().expect("lock").push(prompt.to_string());
        self.answer
    }
}

/// Create a file with the given content inside `dir`.
pub fn create_test_file(dir: &std::path::Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write test file");
    path
}
