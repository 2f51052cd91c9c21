//! HTTP collector transport.
//!
//! POSTs each batch as a JSON envelope:
//! `{"events": [...], "transport_time": <ms since epoch>}`. The events
//! keep their wire shape and order; `transport_time` lets the collector
//! correct for the delay between event time and delivery time.

use crate::error::{TransportError, TransportResult};
use crate::transport::Transport;
use async_trait::async_trait;
use beacon_types::{Event, Timestamp};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Configuration for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Collector endpoint URL.
    pub endpoint: String,
    /// Per-request timeout; a hung collector counts as a failed attempt.
    pub request_timeout: Duration,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Delivers batches to an HTTP collector.
pub struct HttpTransport {
    config: HttpTransportConfig,
    client: Client,
}

impl HttpTransport {
    /// Creates a transport for the given endpoint with default settings.
    pub fn new(endpoint: impl Into<String>) -> TransportResult<Self> {
        Self::with_config(HttpTransportConfig {
            endpoint: endpoint.into(),
            ..Default::default()
        })
    }

    /// Creates a transport from a full configuration.
    ///
    /// The endpoint is validated here, so a usable transport is one that
    /// was constructed successfully.
    pub fn with_config(config: HttpTransportConfig) -> TransportResult<Self> {
        reqwest::Url::parse(&config.endpoint)
            .map_err(|error| TransportError::InvalidEndpoint(format!("{}: {error}", config.endpoint)))?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|error| TransportError::Network(error.to_string()))?;

        Ok(Self { config, client })
    }

    /// The configured collector endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &'static str {
        "HttpTransport"
    }

    async fn handle(&self, batch: &[Event]) -> TransportResult<()> {
        let envelope = serde_json::json!({
            "events": batch,
            "transport_time": Timestamp::now(),
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&envelope)
            .send()
            .await
            .map_err(|error| TransportError::Network(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Rejected {
                status: status.as_u16(),
            });
        }

        debug!(batch_len = batch.len(), status = status.as_u16(), "batch accepted by collector");
        Ok(())
    }
}
