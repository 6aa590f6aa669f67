use super::messages::{RecognitionCommand, RecognitionControlMessage};
use anyhow::{Context, Result};
use async_nats::Client;
use tracing::info;

pub struct NatsClient {
    client: Client,
    stream_id: String,
}

impl NatsClient {
    /// Connect to NATS server
    pub async fn connect(url: &str, stream_id: String) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self { client, stream_id })
    }

    pub fn stream_id(&self) -> &str {
        &self.stream_id
    }

    pub fn control_subject(&self) -> String {
        format!("stt.control.{}", self.stream_id)
    }

    pub fn results_subject(&self) -> String {
        format!("stt.results.{}", self.stream_id)
    }

    pub fn status_subject(&self) -> String {
        format!("stt.status.{}", self.stream_id)
    }

    /// Publish a start/stop command to the recognizer
    pub async fn publish_control(
        &self,
        command: RecognitionCommand,
        language: &str,
        interim_results: bool,
    ) -> Result<()> {
        let subject = self.control_subject();

        let message = RecognitionControlMessage {
            stream_id: self.stream_id.clone(),
            command,
            language: language.to_string(),
            interim_results,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let payload = serde_json::to_vec(&message)?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .context("Failed to publish recognition command")?;

        info!("Published {:?} to {}", command, subject);

        Ok(())
    }

    /// Subscribe to recognition result batches
    pub async fn subscribe_results(&self) -> Result<async_nats::Subscriber> {
        let subject = self.results_subject();

        info!("Subscribing to recognition results on {}", subject);

        self.client
            .subscribe(subject)
            .await
            .context("Failed to subscribe to recognition results")
    }

    /// Subscribe to capture lifecycle events
    pub async fn subscribe_status(&self) -> Result<async_nats::Subscriber> {
        let subject = self.status_subject();

        info!("Subscribing to capture status on {}", subject);

        self.client
            .subscribe(subject)
            .await
            .context("Failed to subscribe to capture status")
    }
}
