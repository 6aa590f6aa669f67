//! Speech recognition adapter
//!
//! The recognizer itself is an external capability. This module defines the
//! contract the call orchestrator drives (`RecognitionAdapter`) and the events
//! it consumes (`RecognitionEvent`), plus a NATS-backed implementation.

pub mod adapter;
pub mod nats;

pub use adapter::{RecognitionAdapter, RecognitionEvent, ResultFragment};
pub use nats::NatsRecognizer;
