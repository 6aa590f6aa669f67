use super::messages::{AnalysisRequest, AnalysisResponse};
use crate::error::CallError;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, error, info};

/// Analysis capability consumed by the call orchestrator
#[async_trait::async_trait]
pub trait AnalysisService: Send + Sync {
    /// Analyze one utterance; any transport or service failure is a `CallError::Analysis`
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, CallError>;
}

/// Analysis service reached over HTTP
pub struct HttpAnalysisClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAnalysisClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build analysis HTTP client")?;
        let endpoint = endpoint.into();

        info!("Initialized analysis client with endpoint: {}", endpoint);

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl AnalysisService for HttpAnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, CallError> {
        debug!(
            "Sending utterance for analysis (session={}, chars={})",
            request.session_id,
            request.utterance_text.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CallError::Analysis("tempo esgotado".to_string())
                } else {
                    CallError::Analysis(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Analysis request failed with status {}: {}", status, body);
            return Err(CallError::Analysis(format!("status {}", status)));
        }

        response
            .json::<AnalysisResponse>()
            .await
            .map_err(|e| CallError::Analysis(format!("resposta inválida: {}", e)))
    }
}
