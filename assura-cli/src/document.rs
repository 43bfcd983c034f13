//! Contract document generation: a live HTTP backend and a timed simulation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use assura_types::constants::RECORDING_DELAY;
use assura_types::customer::{CustomerRecord, DocumentRequest, DocumentResponse};

use crate::config::{AppConfig, Mode};

/// Outcome of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated {
    /// Contract text to place in the display area.
    Document(String),
    /// The simulated recorder finished; there is no text.
    Simulated,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document endpoint returned HTTP {0}")]
    Status(u16),

    #[error("document endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed document response: {0}")]
    MalformedResponse(String),

    #[error("document response has no contract field")]
    MissingField,
}

/// Turns customer data into a contract document.
#[async_trait]
pub trait DocumentService: Send + Sync {
    fn mode(&self) -> Mode;

    async fn generate(&self, record: &CustomerRecord) -> Result<Generated, DocumentError>;
}

/// `POST {"customer_data": ...}` to the configured endpoint.
pub struct HttpDocumentService {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpDocumentService {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DocumentService for HttpDocumentService {
    fn mode(&self) -> Mode {
        Mode::Live
    }

    async fn generate(&self, record: &CustomerRecord) -> Result<Generated, DocumentError> {
        let body = DocumentRequest {
            customer_data: record,
        };
        let resp = self.client.post(&self.endpoint).json(&body).send().await?;

        if !resp.status().is_success() {
            return Err(DocumentError::Status(resp.status().as_u16()));
        }

        let text = resp.text().await?;
        let parsed: DocumentResponse = serde_json::from_str(&text)
            .map_err(|e| DocumentError::MalformedResponse(e.to_string()))?;
        let contract = parsed.contract.ok_or(DocumentError::MissingField)?;
        tracing::debug!(bytes = contract.len(), "contract document received");
        Ok(Generated::Document(contract))
    }
}

/// Waits a fixed delay and reports success.
#[derive(Debug, Clone)]
pub struct SimulatedRecorder {
    delay: Duration,
}

impl Default for SimulatedRecorder {
    fn default() -> Self {
        Self {
            delay: RECORDING_DELAY,
        }
    }
}

impl SimulatedRecorder {
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl DocumentService for SimulatedRecorder {
    fn mode(&self) -> Mode {
        Mode::Mock
    }

    async fn generate(&self, record: &CustomerRecord) -> Result<Generated, DocumentError> {
        tracing::debug!(name = %record.name, delay_ms = self.delay.as_millis() as u64, "simulating recording");
        tokio::time::sleep(self.delay).await;
        Ok(Generated::Simulated)
    }
}

/// Pick the document backend for the configured mode.
pub fn service_from_config(config: &AppConfig) -> Arc<dyn DocumentService> {
    match config.mode {
        Mode::Live => Arc::new(HttpDocumentService::new(&config.document.endpoint)),
        Mode::Mock => Arc::new(SimulatedRecorder::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_simulated_recorder_waits_full_delay() {
        let recorder = SimulatedRecorder::default();
        let record = CustomerRecord::default();
        let start = tokio::time::Instant::now();
        let out = recorder.generate(&record).await.unwrap();
        assert_eq!(out, Generated::Simulated);
        assert!(start.elapsed() >= RECORDING_DELAY);
    }

    #[test]
    fn test_service_follows_mode() {
        let mut config = AppConfig::default();
        assert_eq!(service_from_config(&config).mode(), Mode::Live);
        config.mode = Mode::Mock;
        assert_eq!(service_from_config(&config).mode(), Mode::Mock);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let service = HttpDocumentService::new("http://127.0.0.1:1/generate-contract");
        let err = service
            .generate(&CustomerRecord::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentError::Transport(_)));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(
            DocumentError::Status(500).to_string(),
            "document endpoint returned HTTP 500"
        );
    }
}
