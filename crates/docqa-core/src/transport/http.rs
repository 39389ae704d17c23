//! HTTP binding of the transport contract.

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use url::Url;

use super::{
    HealthResponse, QueryRequest, QueryResponse, ResetRequest, SessionId, Transport,
    TransportError, TransportResult, UploadFile, UploadResponse,
};
use crate::config::ServerConfig;

const PDF_MIME: &str = "application/pdf";
const UPLOAD_FIELD: &str = "files";

/// reqwest-backed client for the question-answering service.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Builds a client for `config.base_url` with the configured timeouts.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let parsed = Url::parse(config.base_url.trim())
            .with_context(|| format!("invalid server URL '{}'", config.base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!(
                "unsupported server URL scheme '{}' (expected http or https)",
                parsed.scheme()
            );
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder.build().context("build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks that the service is up.
    pub async fn health(&self) -> TransportResult<HealthResponse> {
        let response = self.http.get(self.endpoint("health")).send().await?;
        decode_json(response).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    async fn upload(&self, files: Vec<UploadFile>) -> TransportResult<UploadResponse> {
        let count = files.len();
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.bytes)
                .file_name(file.name)
                .mime_str(PDF_MIME)?;
            form = form.part(UPLOAD_FIELD, part);
        }

        tracing::debug!(files = count, "POST /upload");
        let response = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;
        decode_json(response).await
    }

    async fn query(&self, request: QueryRequest) -> TransportResult<QueryResponse> {
        tracing::debug!(session = ?request.session_id, "POST /query");
        let response = self
            .http
            .post(self.endpoint("query"))
            .json(&request)
            .send()
            .await?;
        decode_json(response).await
    }

    async fn reset(&self, session_id: SessionId) -> TransportResult<()> {
        tracing::debug!(session = %session_id, "POST /reset");
        let response = self
            .http
            .post(self.endpoint("reset"))
            .json(&ResetRequest {
                session_id: &session_id,
            })
            .send()
            .await?;
        ensure_success(response).await.map(drop)
    }
}

/// Turns a non-success response into a [`TransportError`] carrying the
/// service's `detail`.
async fn ensure_success(response: reqwest::Response) -> TransportResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = TransportError::http_status(status.as_u16(), &body);
    tracing::warn!(status = status.as_u16(), detail = ?err.detail, "service returned an error");
    Err(err)
}

async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> TransportResult<T> {
    let response = ensure_success(response).await?;
    let body = response.bytes().await?;
    serde_json::from_slice(&body)
        .map_err(|err| TransportError::decode(format!("unexpected response body: {err}")))
}
