//! # envmon-adapter-collector-http
//!
//! Implements `CollectorPort` by posting JSON to the collector service.
//!
//! ## Contract
//!
//! - `POST {base_url}/api/data` with the payload as a JSON body.
//! - `201 Created` means the record was stored. The body normally carries a
//!   `status` field, which is logged when present.
//! - Any other status is a rejection; the body is kept for the log line.
//! - Connection failures and timeouts mean the collector is unreachable.
//!
//! None of these outcomes is an error for the caller: every call resolves
//! to a `TransmissionOutcome`.
//!
//! ## Dependency rule
//!
//! Depends on `envmon-app` (port traits) and `envmon-domain` only.

use std::error::Error as _;
use std::time::Duration;

use envmon_app::ports::CollectorPort;
use envmon_domain::payload::CollectorPayload;
use envmon_domain::transmission::TransmissionOutcome;
use reqwest::{Client, StatusCode, Url};

const DATA_PATH: &str = "api/data";

/// Errors raised while building the collector client.
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    #[error("invalid collector URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Posts payloads to one collector with a bounded timeout per call.
#[derive(Debug, Clone)]
pub struct HttpCollector {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpCollector {
    /// Build a client for the collector at `base_url`
    /// (e.g. `http://192.168.1.162:5000`).
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::InvalidUrl`] when `base_url` is not an
    /// absolute `http` or `https` URL, or [`CollectorError::Client`] when
    /// the HTTP client cannot be created.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CollectorError> {
        let endpoint = endpoint(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    /// Full URL of the data endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn unreachable(&self, err: &reqwest::Error) -> TransmissionOutcome {
        let cause = if err.is_timeout() {
            format!("timed out after {}ms", self.timeout.as_millis())
        } else {
            let mut cause = err.to_string();
            let mut source = err.source();
            while let Some(inner) = source {
                cause.push_str(": ");
                cause.push_str(&inner.to_string());
                source = inner.source();
            }
            cause
        };
        TransmissionOutcome::Unreachable { cause }
    }
}

fn endpoint(base_url: &str) -> Result<Url, CollectorError> {
    let invalid = |reason: String| CollectorError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };
    let mut base = Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", base.scheme())));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(DATA_PATH).map_err(|err| invalid(err.to_string()))
}

impl CollectorPort for HttpCollector {
    async fn send(&self, payload: &CollectorPayload) -> TransmissionOutcome {
        tracing::debug!(url = %self.endpoint, "posting payload");

        let response = match self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return self.unreachable(&err),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(
                    url = %self.endpoint,
                    status = status.as_u16(),
                    %err,
                    "failed to read collector response body"
                );
                format!("<unreadable response body: {err}>")
            }
        };

        if status == StatusCode::CREATED {
            let collector_status = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|value| value.get("status")?.as_str().map(str::to_owned));
            if let Some(collector_status) = collector_status {
                tracing::debug!(%collector_status, "collector acknowledged payload");
            }
            TransmissionOutcome::Sent {
                status: status.as_u16(),
            }
        } else {
            TransmissionOutcome::Rejected {
                status: status.as_u16(),
                body,
            }
        }
    }
}
