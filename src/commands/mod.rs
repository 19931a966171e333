/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three top-level command modules:

- `chat`     — Interactive chat loop against the backend
- `sessions` — Session listing and management
- `chaos`    — Chaos panel: status, scenarios, traffic, watch

These handlers are intentionally small and use the library components:
the gateway, the chat orchestrator, and the chaos poller/issuer.
*/

pub mod chaos;
pub mod chat;
pub mod sessions;

use crate::config::Config;
use crate::gateway::http::HttpGateway;
use crate::gateway::Gateway;

use std::sync::Arc;

/// Build the HTTP gateway from configuration
///
/// # Errors
///
/// Returns error if the HTTP client cannot be constructed
pub(crate) fn build_gateway(config: &Config) -> crate::error::Result<Arc<dyn Gateway>> {
    let gateway = HttpGateway::new(&config.backend)?;
    Ok(Arc::new(gateway))
}
