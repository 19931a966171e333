//! One-shot chaos commands
//!
//! The issuer sends traffic toggles and scenario triggers, folding their
//! acknowledgements into the same display state the poller maintains so
//! the panel reflects the change without waiting for the next poll tick.

use crate::chaos::catalog;
use crate::chaos::state::{ChaosDisplayState, ScenarioAck, TrafficLevel};
use crate::error::{ChaosChatError, Result};
use crate::gateway::Gateway;

use std::sync::{Arc, Mutex};

/// Sends traffic and scenario commands against the backend
pub struct ChaosCommandIssuer {
    gateway: Arc<dyn Gateway>,
    state: Arc<Mutex<ChaosDisplayState>>,
}

impl ChaosCommandIssuer {
    /// Create an issuer writing into the given display state
    pub fn new(gateway: Arc<dyn Gateway>, state: Arc<Mutex<ChaosDisplayState>>) -> Self {
        Self { gateway, state }
    }

    /// Enable or disable synthetic traffic generation
    ///
    /// The local `traffic_enabled` flag is set from the acknowledgement
    /// value returned by the backend, never assumed from the request, so a
    /// backend-side rejection is correctly reflected.
    ///
    /// # Returns
    ///
    /// The enabled state acknowledged by the backend
    pub async fn set_traffic(&self, enabled: bool, level: TrafficLevel) -> Result<bool> {
        let ack = self.gateway.set_traffic(enabled, level).await?;

        let mut state = self.state.lock().expect("chaos state lock poisoned");
        state.apply_traffic_ack(&ack);
        tracing::info!("Traffic generation acknowledged: enabled={}", ack.enabled);
        Ok(ack.enabled)
    }

    /// Trigger a break-fix scenario or quick action
    ///
    /// Unknown ids and already-active scenarios are rejected locally
    /// without a network call; quick actions are always repeatable. After
    /// a successful trigger an immediate out-of-band status refresh is
    /// requested so the active-scenario set reflects the change without
    /// up-to-interval lag; a failure of that refresh is swallowed.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for unknown or already-active scenarios, or
    /// `Transport`/`Backend` when the trigger call itself fails.
    pub async fn trigger(&self, scenario_id: &str) -> Result<ScenarioAck> {
        if catalog::find(scenario_id).is_none() {
            return Err(
                ChaosChatError::Validation(format!("Unknown scenario: {}", scenario_id)).into(),
            );
        }

        if !catalog::is_quick_action(scenario_id) {
            let state = self.state.lock().expect("chaos state lock poisoned");
            if state.is_scenario_active(scenario_id) {
                return Err(ChaosChatError::Validation(format!(
                    "Scenario already active: {}",
                    scenario_id
                ))
                .into());
            }
        }

        let ack = self.gateway.trigger_scenario(scenario_id).await?;
        tracing::info!(
            "Scenario {} triggered: success={}",
            scenario_id,
            ack.success
        );

        self.refresh_status().await;
        Ok(ack)
    }

    /// Fetch the status once and fold it into the display state
    ///
    /// Failures are logged and swallowed; the panel keeps its last-known
    /// state.
    pub async fn refresh_status(&self) {
        match self.gateway.chaos_status().await {
            Ok(status) => {
                let mut state = self.state.lock().expect("chaos state lock poisoned");
                state.apply_status(status);
            }
            Err(e) => {
                tracing::warn!("Out-of-band status refresh failed: {}", e);
            }
        }
    }
}
