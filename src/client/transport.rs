//! Raw HTTP transport to the upstream service.
//!
//! # Responsibilities
//! - Perform one network call given a method, path and optional JSON body
//! - Surface transport-level failures (connect, timeout, I/O) distinctly
//!   from application responses; non-2xx statuses come back as responses
//!
//! # Design Decisions
//! - No resilience here; breaker, retry and deadline live in the client
//! - Status kept as a bare u16 so scripted test transports stay trivial

use std::future::Future;
use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::config::schema::UpstreamConfig;

/// Raw result of one upstream call: the status and the unparsed body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failure; every variant is transient by nature.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("transport timed out")]
    Timeout,

    #[error("i/o error: {0}")]
    Io(String),
}

/// Failure constructing the transport at startup.
#[derive(Debug, thiserror::Error)]
pub enum TransportSetupError {
    #[error("invalid upstream base url: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// One network call to the upstream.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// Reqwest-backed transport.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, TransportSetupError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))?;
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Join `path` onto the base URL. The Url parser percent-encodes path
    /// segments (employee names may contain spaces).
    fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        let joined = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|e| TransportError::Io(format!("invalid request url: {e}")))
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<RawResponse, TransportError> {
        let url = self.url_for(path)?;
        tracing::debug!(method = %method, url = %url, "Upstream request");

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(json) = body {
            request = request.json(&json);
        }

        let response = request.send().await.map_err(classify_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Io(e.to_string()))?;

        tracing::debug!(method = %method, url = %url, status, "Upstream response");
        Ok(RawResponse { status, body })
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else {
        TransportError::Io(err.to_string())
    }
}
