//! ChaosChat - Terminal chat client and chaos control panel
//!
//! ChaosChat talks to the chat-demo backend: it holds multi-session
//! conversations, manages session lifecycle, and drives the backend's
//! fault-injection scenarios while polling aggregate system health.
//!
//! The crate is organized around a small set of components:
//!
//! - [`gateway`] — HTTP boundary to the backend, behind a trait
//! - [`session`] — session store and active-session timeline
//! - [`chat`] — the submission orchestrator tying the two together
//! - [`chaos`] — panel state, scenario catalog, poller, command issuer
//! - [`commands`] — CLI command handlers

pub mod chaos;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod session;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use error::{ChaosChatError, Result};
