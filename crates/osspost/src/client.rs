//! Direct upload client.
//!
//! Authorizes and executes exactly one object upload per call: builds and
//! signs a fresh policy, derives the object key, and POSTs a single
//! multipart form to the configured host. No retries, no backoff; the only
//! deadline is the HTTP client's default timeout.

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::config::OssConfig;
use crate::error::{UploadError, UploadResult};
use crate::keys;
use crate::policy::{SignedRequest, UploadPolicy};
use crate::progress::UploadProgress;

/// Result of a successful direct upload.
#[derive(Clone, Debug, serde::Serialize)]
pub struct UploadOutcome {
    /// Key under which the object was stored.
    pub object_key: String,
    /// Public URL of the stored object: `host + "/" + object_key`.
    pub url: String,
    /// HTTP status returned by the backend.
    pub status: u16,
    /// Raw response body (empty for a standard 200 response).
    pub body: String,
}

/// Client for direct-to-OSS uploads with a caller-owned progress hook.
#[derive(Clone)]
pub struct UploadClient {
    client: Client,
    config: OssConfig,
    progress: Option<Arc<dyn UploadProgress>>,
}

impl UploadClient {
    pub fn new(config: OssConfig) -> UploadResult<Self> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;

        Ok(Self {
            client,
            config,
            progress: None,
        })
    }

    /// Attach a progress sink. The sink is owned by the caller and shared
    /// read-only by the client; each upload call pairs `started` with
    /// exactly one `finished`.
    pub fn with_progress(mut self, progress: Arc<dyn UploadProgress>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn config(&self) -> &OssConfig {
        &self.config
    }

    /// Upload one local file. Resolves with the stored object's key and URL,
    /// or fails with a tagged error: `Source` (unreadable file), `Transport`
    /// (network failure), or `Rejected` (backend refused the signed form).
    ///
    /// No size or MIME validation happens here; the policy's
    /// content-length-range condition delegates size enforcement to the
    /// backend. `show_progress` only controls the progress hook and has no
    /// effect on the upload's semantics.
    pub async fn upload(
        &self,
        local_file_path: &str,
        show_progress: bool,
    ) -> UploadResult<UploadOutcome> {
        let data = tokio::fs::read(local_file_path)
            .await
            .map_err(|source| UploadError::Source {
                path: local_file_path.to_string(),
                source,
            })?;
        let size = data.len() as u64;

        let object_key = keys::object_key(local_file_path);
        let policy = UploadPolicy::new();
        let signed = SignedRequest::build(&policy, &self.config.access_key_secret)?;

        let file_name = std::path::Path::new(local_file_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();

        // The backend requires the binary part after the policy fields.
        let form = Form::new()
            .text("name", object_key.clone())
            .text("key", object_key.clone())
            .text("policy", signed.policy_base64)
            .text("OSSAccessKeyId", self.config.access_key_id.clone())
            .text("success_action_status", "200")
            .text("signature", signed.signature)
            .part("file", Part::bytes(data).file_name(file_name));

        let progress = if show_progress {
            self.progress.as_deref()
        } else {
            None
        };

        let start = std::time::Instant::now();

        if let Some(p) = progress {
            p.started();
        }
        let result = self
            .client
            .post(&self.config.upload_host)
            .multipart(form)
            .send()
            .await;
        if let Some(p) = progress {
            p.finished();
        }

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    bucket = %self.config.bucket,
                    key = %object_key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "direct upload transport failure"
                );
                return Err(UploadError::Transport(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                status = %status,
                bucket = %self.config.bucket,
                key = %object_key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "direct upload rejected"
            );
            return Err(UploadError::Rejected { status, body });
        }

        let body = response.text().await?;
        let url = format!("{}/{}", self.config.upload_host, object_key);

        tracing::info!(
            bucket = %self.config.bucket,
            key = %object_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "direct upload successful"
        );

        Ok(UploadOutcome {
            object_key,
            url,
            status: status.as_u16(),
            body,
        })
    }
}
