//! HTTP transport for built requests.

use std::future::Future;
use std::time::Duration;

use diagnosense_core::request::{ApiRequest, RequestBody, DEFAULT_API_BASE_URL};
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use crate::error::{ClientError, TransportError};

/// Status and raw body of a settled HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends an [`ApiRequest`] and hands back whatever came back.
///
/// Non-2xx statuses are not errors at this level; only a missing response
/// is.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<HttpReply, TransportError>> + Send;
}

/// Connection settings for [`HttpTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: None,
            user_agent: format!("diagnosense/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// reqwest-backed transport. JSON bodies are posted as
/// `application/json`, uploads as a single-part multipart form.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<HttpReply, TransportError> {
        let url = request.url(&self.base_url);
        let builder = self.client.post(&url);

        let builder = match &request.body {
            RequestBody::Json(value) => {
                debug!(%url, body = %value, "posting JSON");
                builder.json(value)
            }
            RequestBody::Multipart { field_name, file } => {
                debug!(
                    %url,
                    field = *field_name,
                    file_name = %file.file_name,
                    size = file.bytes.len(),
                    "posting multipart"
                );
                let part = Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone())
                    .mime_str(&file.content_type)?;
                builder.multipart(Form::new().part(*field_name, part))
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        info!(disease = %request.disease, %url, status, bytes = body.len(), "response received");

        Ok(HttpReply { status, body })
    }
}
