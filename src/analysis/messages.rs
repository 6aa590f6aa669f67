use serde::{Deserialize, Serialize};

/// Request sent to the analysis service for one finalized utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub session_id: String,
    #[serde(rename = "client_id")]
    pub client_ref: String,
    #[serde(rename = "speech_text")]
    pub utterance_text: String,
}

/// Analysis of one utterance as returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(rename = "analysis")]
    pub analysis_text: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    pub sentiment_score: i64,
    #[serde(rename = "call_flow_status")]
    pub flow_status: String,
}

impl AnalysisResponse {
    /// Sentiment clamped to the 0..=100 range shown to the agent
    pub fn sentiment(&self) -> u8 {
        self.sentiment_score.clamp(0, 100) as u8
    }
}
