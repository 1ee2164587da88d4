//! Multipart client for the document upload backend.
//!
//! `POST {base}/api/upload` with a `file` part and a `docKey` text field.
//! The server answers JSON `{ok, filename, download_url, message}`; any
//! non-2xx status or `ok` other than `true` is a refusal.

use crate::domain::{UploadEndpoint, UploadError, UploadJob, UploadReceipt};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

pub const UPLOAD_PATH: &str = "/api/upload";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    ok: bool,
    filename: Option<String>,
    download_url: Option<String>,
    message: Option<String>,
}

/// Interprets a raw response. Split out from the transport so the contract
/// can be checked without a server.
pub fn parse_upload_response(status: u16, body: &str) -> Result<UploadReceipt, UploadError> {
    let parsed = serde_json::from_str::<UploadResponse>(body);
    if !(200..300).contains(&status) {
        let message = parsed.ok().and_then(|response| response.message);
        return Err(UploadError::rejected(Some(status), message));
    }
    let response = parsed.map_err(|err| UploadError::MalformedResponse(err.to_string()))?;
    if !response.ok {
        return Err(UploadError::rejected(Some(status), response.message));
    }
    match (response.filename, response.download_url) {
        (Some(filename), Some(download_path)) => Ok(UploadReceipt {
            filename,
            download_path,
        }),
        _ => Err(UploadError::MalformedResponse(
            "missing filename or download_url".to_string(),
        )),
    }
}

#[derive(Debug, Clone)]
pub struct HttpUploadClient {
    client: Client,
    endpoint: String,
}

impl HttpUploadClient {
    pub fn new(backend_base: &str) -> Result<Self, UploadError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| UploadError::Transport(err.to_string()))?;
        Ok(Self::with_client(client, backend_base))
    }

    pub fn with_client(client: Client, backend_base: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{UPLOAD_PATH}", backend_base.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl UploadEndpoint for HttpUploadClient {
    fn upload(&self, job: &UploadJob) -> Result<UploadReceipt, UploadError> {
        let bytes = std::fs::read(&job.file.path).map_err(|err| UploadError::ReadFile {
            path: job.file.path.display().to_string(),
            message: err.to_string(),
        })?;
        let part = Part::bytes(bytes).file_name(job.file.name.clone());
        let form = Form::new()
            .part("file", part)
            .text("docKey", job.key.as_str());

        tracing::debug!(endpoint = %self.endpoint, doc_key = %job.key, "sending upload");
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(|err| UploadError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|err| UploadError::Transport(err.to_string()))?;
        parse_upload_response(status, &body)
    }
}
