pub mod analysis;
pub mod config;
pub mod directory;
pub mod error;
pub mod http;
pub mod nats;
pub mod recognition;
pub mod session;

pub use analysis::{AnalysisRequest, AnalysisResponse, AnalysisService, HttpAnalysisClient};
pub use config::Config;
pub use directory::{ClientDirectory, ClientRecord, ClientRef, HttpClientDirectory};
pub use error::CallError;
pub use http::{create_router, AppState};
pub use recognition::{NatsRecognizer, RecognitionAdapter, RecognitionEvent, ResultFragment};
pub use session::{
    CallOrchestrator, CallPhase, CallSession, CallSnapshot, ConversationEntry, DerivedSignals,
    EntryKind, Notice, NoticeLevel, SessionConfig,
};
