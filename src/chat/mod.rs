//! Chat orchestration
//!
//! This module drives the "compose a prompt, send, receive, integrate"
//! lifecycle over the session store and the timeline.

pub mod orchestrator;

pub use orchestrator::{ChatOrchestrator, SubmitOutcome};
