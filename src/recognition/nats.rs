use super::adapter::{RecognitionAdapter, RecognitionEvent};
use crate::config::RecognitionConfig;
use crate::nats::{
    CaptureStatus, NatsClient, RecognitionCommand, RecognitionResultMessage,
    RecognitionStatusMessage,
};
use anyhow::{Context, Result};
use futures::stream::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Recognition adapter backed by a remote STT service reached over NATS
pub struct NatsRecognizer {
    client: Arc<NatsClient>,
    language: String,
    interim_results: bool,
    listeners: Vec<JoinHandle<()>>,
}

impl NatsRecognizer {
    /// Connect to NATS and start forwarding recognizer traffic as events
    pub async fn connect(
        config: &RecognitionConfig,
    ) -> Result<(Self, mpsc::Receiver<RecognitionEvent>)> {
        let client = Arc::new(
            NatsClient::connect(&config.nats_url, config.stream_id.clone())
                .await
                .context("Failed to connect recognizer to NATS")?,
        );

        let (event_tx, event_rx) = mpsc::channel(100);

        let mut results = client.subscribe_results().await?;
        let stream_id = config.stream_id.clone();
        let results_tx = event_tx.clone();
        let results_task = tokio::spawn(async move {
            info!("Recognition results listener started");

            while let Some(msg) = results.next().await {
                match serde_json::from_slice::<RecognitionResultMessage>(&msg.payload) {
                    Ok(result) => {
                        let Some(event) = result_event(result, &stream_id) else {
                            continue;
                        };
                        if results_tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to parse recognition result: {}", e);
                    }
                }
            }

            info!("Recognition results listener stopped");
        });

        let mut status = client.subscribe_status().await?;
        let stream_id = config.stream_id.clone();
        let status_task = tokio::spawn(async move {
            info!("Capture status listener started");

            while let Some(msg) = status.next().await {
                match serde_json::from_slice::<RecognitionStatusMessage>(&msg.payload) {
                    Ok(status) => {
                        let Some(event) = status_event(status, &stream_id) else {
                            continue;
                        };
                        if event_tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to parse capture status: {}", e);
                    }
                }
            }

            info!("Capture status listener stopped");
        });

        let recognizer = Self {
            client,
            language: config.language.clone(),
            interim_results: config.interim_results,
            listeners: vec![results_task, status_task],
        };

        Ok((recognizer, event_rx))
    }
}

impl Drop for NatsRecognizer {
    fn drop(&mut self) {
        for listener in &self.listeners {
            listener.abort();
        }
    }
}

#[async_trait::async_trait]
impl RecognitionAdapter for NatsRecognizer {
    async fn start(&self) -> Result<()> {
        self.client
            .publish_control(RecognitionCommand::Start, &self.language, self.interim_results)
            .await
    }

    async fn stop(&self) -> Result<()> {
        self.client
            .publish_control(RecognitionCommand::Stop, &self.language, self.interim_results)
            .await
    }

    fn name(&self) -> &str {
        "nats"
    }
}

/// Map a result batch to an event, skipping other streams and empty batches
pub fn result_event(msg: RecognitionResultMessage, stream_id: &str) -> Option<RecognitionEvent> {
    if msg.stream_id != stream_id {
        debug!("Ignoring results for stream {}", msg.stream_id);
        return None;
    }
    if msg.fragments.is_empty() {
        return None;
    }
    Some(RecognitionEvent::Results(msg.fragments))
}

/// Map a lifecycle message to an event, skipping other streams
pub fn status_event(msg: RecognitionStatusMessage, stream_id: &str) -> Option<RecognitionEvent> {
    if msg.stream_id != stream_id {
        debug!("Ignoring capture status for stream {}", msg.stream_id);
        return None;
    }
    let event = match msg.status {
        CaptureStatus::Started => RecognitionEvent::CaptureStarted,
        CaptureStatus::Stopped => RecognitionEvent::CaptureStopped,
        CaptureStatus::Error => RecognitionEvent::CaptureError(
            msg.reason.unwrap_or_else(|| "unknown".to_string()),
        ),
    };
    Some(event)
}
