//! Call session orchestration
//!
//! This module provides the `CallOrchestrator` that manages:
//! - Call lifecycle (idle → active → ended) and client selection
//! - Driving the recognition adapter, including automatic capture restarts
//! - Transcript assembly from interim and final recognition results
//! - Dispatching finalized utterances for analysis and ordering the results
//! - Conversation history, derived signals and agent notices

mod config;
mod dispatcher;
mod history;
pub mod labels;
mod notice;
mod orchestrator;
mod signals;
mod snapshot;
mod transcript;

pub use config::{SessionConfig, MAX_RESTART_DELAY};
pub use dispatcher::{AnalysisDispatcher, DispatchOutcome, DispatchTicket};
pub use history::{ConversationEntry, ConversationLog, EntryKind};
pub use notice::{Notice, NoticeLevel};
pub use orchestrator::CallOrchestrator;
pub use signals::{DerivedSignals, SignalBoard};
pub use snapshot::{CallPhase, CallSession, CallSnapshot};
pub use transcript::TranscriptAssembler;
