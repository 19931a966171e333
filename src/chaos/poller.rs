//! Periodic chaos status poller
//!
//! While the panel is open the poller fetches the aggregate status
//! immediately and then on a fixed interval, replacing the shared display
//! state with each result. Fetch failures are logged and swallowed so the
//! panel degrades to last-known status instead of blanking on transient
//! errors.
//!
//! `stop()` is deterministic: the cancellation token is checked after
//! every fetch and before every state mutation, so a fetch resolving
//! after `stop()` cannot mutate state, and the task itself is aborted.

use crate::chaos::state::ChaosDisplayState;
use crate::gateway::Gateway;

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct PollerRun {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Cancellable periodic status fetcher bound to a panel's lifetime
pub struct ChaosPoller {
    gateway: Arc<dyn Gateway>,
    state: Arc<Mutex<ChaosDisplayState>>,
    run: Option<PollerRun>,
}

impl ChaosPoller {
    /// Create a poller that reconciles into the given display state
    pub fn new(gateway: Arc<dyn Gateway>, state: Arc<Mutex<ChaosDisplayState>>) -> Self {
        Self {
            gateway,
            state,
            run: None,
        }
    }

    /// Returns true while a polling task is active
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Start polling: one immediate fetch, then one per interval
    ///
    /// Starting an already-running poller restarts it with the new
    /// interval.
    pub fn start(&mut self, interval: Duration) {
        self.stop();

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let gateway = Arc::clone(&self.gateway);
        let state = Arc::clone(&self.state);

        let handle = tokio::spawn(async move {
            loop {
                let fetched = gateway.chaos_status().await;

                // The panel may have closed while the fetch was in flight;
                // a late result must not be applied.
                if token.is_cancelled() {
                    break;
                }

                match fetched {
                    Ok(status) => {
                        let mut state = state.lock().expect("chaos state lock poisoned");
                        state.apply_status(status);
                    }
                    Err(e) => {
                        tracing::warn!("Chaos status poll failed, keeping last known: {}", e);
                    }
                }

                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
        });

        self.run = Some(PollerRun { cancel, handle });
    }

    /// Stop polling, guaranteeing no further state mutation
    ///
    /// Idempotent; safe to call on a poller that was never started.
    pub fn stop(&mut self) {
        if let Some(run) = self.run.take() {
            run.cancel.cancel();
            run.handle.abort();
            tracing::debug!("Chaos poller stopped");
        }
    }
}

impl Drop for ChaosPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
