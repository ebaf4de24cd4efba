//! Transport capability for delivering batches to the collector.
//!
//! The flusher only needs a send-request/get-response-or-error capability;
//! the trait seam keeps the HTTP client injectable so tests can substitute
//! stubs and callers can supply their own client.

use async_trait::async_trait;

/// Outbound batch request: a POST of newline-joined event lines.
#[derive(Debug, Clone)]
pub struct CollectorRequest {
    pub url: String,
    pub body: String,
}

/// Response observed from the collector.
#[derive(Debug, Clone, Copy)]
pub struct CollectorResponse {
    pub status: u16,
}

impl CollectorResponse {
    /// A batch is accepted iff the status code is in `[200, 400)`.
    #[must_use]
    pub fn is_accepted(self) -> bool {
        (200..400).contains(&self.status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
}

/// Capability to deliver one batch request and observe the outcome.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: CollectorRequest) -> Result<CollectorResponse, TransportError>;
}

/// Production transport backed by a shared `reqwest` client.
///
/// No timeout is imposed here; any timeout must come from the client the
/// caller builds.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: CollectorRequest) -> Result<CollectorResponse, TransportError> {
        let response = self
            .client
            .post(&request.url)
            .body(request.body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(CollectorResponse {
            status: response.status().as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceptance_window() {
        assert!(CollectorResponse { status: 200 }.is_accepted());
        assert!(CollectorResponse { status: 204 }.is_accepted());
        assert!(CollectorResponse { status: 302 }.is_accepted());
        assert!(CollectorResponse { status: 399 }.is_accepted());
        assert!(!CollectorResponse { status: 400 }.is_accepted());
        assert!(!CollectorResponse { status: 199 }.is_accepted());
        assert!(!CollectorResponse { status: 500 }.is_accepted());
    }

    #[tokio::test]
    async fn test_http_transport_reports_network_errors() {
        let transport = HttpTransport::new();
        let result = transport
            .send(CollectorRequest {
                // Discard port on loopback, connection is refused immediately.
                url: "http://127.0.0.1:9/collector".to_string(),
                body: "line".to_string(),
            })
            .await;
        assert!(matches!(result, Err(TransportError::Network(_))));
    }
}
