//! Chaos control panel components
//!
//! This module contains the chaos panel's display state, the static
//! scenario catalog, the periodic status poller, and the one-shot
//! command issuer.

pub mod catalog;
pub mod issuer;
pub mod poller;
pub mod state;

pub use catalog::{Scenario, Severity};
pub use issuer::ChaosCommandIssuer;
pub use poller::ChaosPoller;
pub use state::{
    ChaosDisplayState, ChaosStatus, ComponentHealth, ComponentHealthSet, ScenarioAck, TrafficAck,
    TrafficLevel, TrafficStats,
};
