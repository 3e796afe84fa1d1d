//! HTTP client for the sharing server's upload and delete endpoints.
//!
//! The server is an opaque collaborator: `POST /upload` takes a multipart
//! body (the file plus string-encoded upload parameters) and answers 200
//! with a JSON acknowledgment; `POST /file/delete` takes a form-urlencoded
//! `file_id`. Any non-200 status maps to [`Error::Transport`], a request
//! that never completes to [`Error::Network`].

use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_util::io::ReaderStream;

use crate::error::{Error, Result};
use crate::session::{FileSource, UploadDefaults};

/// Acknowledgment body of a successful upload.
///
/// Decoded leniently: the session treats the body as acknowledgment only and
/// never fails on an unexpected shape. `url` is surfaced when present so
/// hosts can offer a copyable share link.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    /// Server-relative URL of the uploaded file, when the server names one
    pub url: Option<String>,
}

/// Client for one sharing server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the server at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// The server this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a server-relative path against the base URL.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Upload one file with the given defaults, streaming the body.
    ///
    /// Cumulative sent-byte counts are reported through `progress` as the
    /// body streams out. When the file size is unknown no length is attached
    /// to the part; callers treat the missing total as "indicator does not
    /// advance".
    ///
    /// # Errors
    ///
    /// `Error::Network` if the request could not be completed,
    /// `Error::Transport` on any non-200 status.
    pub async fn upload(
        &self,
        source: &FileSource,
        defaults: &UploadDefaults,
        progress: mpsc::UnboundedSender<u64>,
    ) -> Result<UploadResponse> {
        let file = tokio::fs::File::open(source.path()).await?;
        let mut sent: u64 = 0;
        let counted = ReaderStream::new(file).map(move |chunk| {
            if let Ok(bytes) = &chunk {
                sent += bytes.len() as u64;
                let _ = progress.send(sent);
            }
            chunk
        });
        let body = reqwest::Body::wrap_stream(counted);

        let part = match source.size() {
            Some(len) => Part::stream_with_length(body, len),
            None => Part::stream(body),
        }
        .file_name(source.name().to_string());

        let form = Form::new()
            .part("file", part)
            .text("expiration_days", defaults.expiration_days.to_string())
            .text("downloads_limit", defaults.downloads_limit.to_string())
            .text("require_auth", defaults.require_auth.to_string());

        tracing::debug!(file = source.name(), "uploading to {}", self.base_url);

        let response = self
            .http
            .post(self.url_for("/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Self::transport_error(status));
        }

        // Acknowledgment only; an unexpected body shape is not a failure.
        Ok(response.json().await.unwrap_or_default())
    }

    /// Delete the file with the given id.
    ///
    /// # Errors
    ///
    /// `Error::Network` if the request could not be completed or the success
    /// body is not JSON, `Error::Transport` on any non-200 status.
    pub async fn delete(&self, file_id: &str) -> Result<serde_json::Value> {
        tracing::debug!(file_id, "deleting on {}", self.base_url);

        let response = self
            .http
            .post(self.url_for("/file/delete"))
            .form(&[("file_id", file_id)])
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Self::transport_error(status));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Network(format!("invalid response body: {e}")))
    }

    fn transport_error(status: StatusCode) -> Error {
        Error::Transport {
            status: status.as_u16(),
            status_text: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
        }
    }
}
