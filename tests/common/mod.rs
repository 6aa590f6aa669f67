// Test doubles for the recognition and analysis capabilities

#![allow(dead_code)]

use anyhow::{bail, Result};
use call_assist::{
    AnalysisRequest, AnalysisResponse, AnalysisService, CallError, CallOrchestrator, CallSnapshot,
    ClientRef, RecognitionAdapter, SessionConfig,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

type AnalysisResult = Result<AnalysisResponse, CallError>;

/// Recognizer that only counts start/stop requests
#[derive(Default)]
pub struct MockRecognizer {
    starts: AtomicUsize,
    stops: AtomicUsize,
    fail_start: AtomicBool,
    fail_stop: AtomicBool,
    start_gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl MockRecognizer {
    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn fail_next_starts(&self, fail: bool) {
        self.fail_start.store(fail, Ordering::SeqCst);
    }

    /// Make the next `stop()` fail
    pub fn fail_next_stop(&self) {
        self.fail_stop.store(true, Ordering::SeqCst);
    }

    /// Block the next `start()` until the returned sender fires
    pub fn hold_next_start(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.start_gate.lock().unwrap() = Some(rx);
        tx
    }
}

#[async_trait::async_trait]
impl RecognitionAdapter for MockRecognizer {
    async fn start(&self) -> Result<()> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        let gate = self.start_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.fail_start.load(Ordering::SeqCst) {
            bail!("microphone unavailable");
        }
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        if self.fail_stop.swap(false, Ordering::SeqCst) {
            bail!("recognizer unreachable");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Analysis service answering per utterance text, immediately or on demand
#[derive(Default)]
pub struct ScriptedAnalysis {
    immediate: Mutex<HashMap<String, AnalysisResult>>,
    deferred: Mutex<HashMap<String, oneshot::Receiver<AnalysisResult>>>,
    requests: Mutex<Vec<AnalysisRequest>>,
}

impl ScriptedAnalysis {
    pub fn respond_with(&self, utterance: &str, result: AnalysisResult) {
        self.immediate
            .lock()
            .unwrap()
            .insert(utterance.to_string(), result);
    }

    /// Hold the response for `utterance` until the returned sender fires
    pub fn respond_later(&self, utterance: &str) -> oneshot::Sender<AnalysisResult> {
        let (tx, rx) = oneshot::channel();
        self.deferred
            .lock()
            .unwrap()
            .insert(utterance.to_string(), rx);
        tx
    }

    pub fn requests(&self) -> Vec<AnalysisRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AnalysisService for ScriptedAnalysis {
    async fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(result) = self
            .immediate
            .lock()
            .unwrap()
            .remove(&request.utterance_text)
        {
            return result;
        }

        let deferred = self
            .deferred
            .lock()
            .unwrap()
            .remove(&request.utterance_text);
        match deferred {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(CallError::Analysis("responder dropped".to_string()))),
            None => Err(CallError::Analysis(format!(
                "no scripted response for {:?}",
                request.utterance_text
            ))),
        }
    }
}

pub struct Harness {
    pub orchestrator: CallOrchestrator,
    pub recognizer: Arc<MockRecognizer>,
    pub analysis: Arc<ScriptedAnalysis>,
}

pub fn harness() -> Harness {
    harness_with(SessionConfig::default())
}

pub fn harness_with(config: SessionConfig) -> Harness {
    let recognizer = Arc::new(MockRecognizer::default());
    let analysis = Arc::new(ScriptedAnalysis::default());
    let orchestrator = CallOrchestrator::new(config, recognizer.clone(), analysis.clone());

    Harness {
        orchestrator,
        recognizer,
        analysis,
    }
}

pub fn client(id: &str) -> ClientRef {
    ClientRef::new(id, format!("Cliente {}", id))
}

pub fn analysis(suggestions: &[&str], sentiment: i64, flow_status: &str) -> AnalysisResponse {
    AnalysisResponse {
        analysis_text: format!("Análise: {}", flow_status),
        suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        sentiment_score: sentiment,
        flow_status: flow_status.to_string(),
    }
}

/// Poll the snapshot until `cond` holds
pub async fn wait_for<F>(orchestrator: &CallOrchestrator, mut cond: F) -> CallSnapshot
where
    F: FnMut(&CallSnapshot) -> bool,
{
    for _ in 0..200 {
        let snapshot = orchestrator.snapshot().await;
        if cond(&snapshot) {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!(
        "condition not reached, last snapshot: {:?}",
        orchestrator.snapshot().await
    );
}
