//! Conversation analysis capability
//!
//! Each finalized utterance is sent to an external service which returns
//! talking-point suggestions, a sentiment score and a call-flow label.

pub mod client;
pub mod messages;

pub use client::{AnalysisService, HttpAnalysisClient};
pub use messages::{AnalysisRequest, AnalysisResponse};
