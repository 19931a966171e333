//! Chaos panel display state and status wire types
//!
//! [`ChaosDisplayState`] is a cache of remote truth: it is refreshed on a
//! fixed interval by the poller and opportunistically on command
//! acknowledgement by the issuer. It is never the source of truth and may
//! be briefly stale; each applied status fully replaces the previous one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Synthetic traffic intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLevel {
    /// 5 requests per minute
    #[default]
    Light,
    /// 20 requests per minute
    Medium,
    /// 60 requests per minute
    Heavy,
}

impl fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Medium => write!(f, "medium"),
            Self::Heavy => write!(f, "heavy"),
        }
    }
}

impl FromStr for TrafficLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "medium" => Ok(Self::Medium),
            "heavy" => Ok(Self::Heavy),
            other => Err(format!("Unknown traffic level: {}", other)),
        }
    }
}

/// Aggregate synthetic traffic statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficStats {
    /// Total requests sent by the generator
    pub total: u64,
    /// Success rate percentage (0-100)
    #[serde(rename = "successRate")]
    pub success_rate: f64,
}

/// Health of a single backend component
///
/// The backend reports "unknown" when its cluster API is unavailable;
/// any unrecognized value is treated the same way rather than failing
/// the whole status fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComponentHealth {
    Healthy,
    Unhealthy,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ComponentHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Unhealthy => write!(f, "unhealthy"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Health of the monitored backend components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComponentHealthSet {
    #[serde(default)]
    pub backend: ComponentHealth,
    #[serde(default)]
    pub worker: ComponentHealth,
    #[serde(default)]
    pub database: ComponentHealth,
    #[serde(default)]
    pub rabbitmq: ComponentHealth,
}

/// Aggregate status payload from `GET /chaos/status`
///
/// Treated as authoritative per call; the display state is replaced
/// wholesale with its content.
#[derive(Debug, Clone, Deserialize)]
pub struct ChaosStatus {
    #[serde(rename = "trafficEnabled", default)]
    pub traffic_enabled: bool,
    #[serde(rename = "trafficLevel", default)]
    pub traffic_level: TrafficLevel,
    #[serde(rename = "trafficStats", default)]
    pub traffic_stats: Option<TrafficStats>,
    #[serde(rename = "activeScenarios", default)]
    pub active_scenarios: Vec<String>,
    #[serde(flatten)]
    pub components: ComponentHealthSet,
}

/// Acknowledgement payload from `POST /chaos/traffic`
#[derive(Debug, Clone, Deserialize)]
pub struct TrafficAck {
    /// Whether traffic generation is enabled after the command
    ///
    /// This is the backend's answer, not an echo of the request; a
    /// backend-side rejection shows up here.
    pub enabled: bool,
    #[serde(default)]
    pub level: TrafficLevel,
}

/// Acknowledgement payload from `POST /chaos/scenario`
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioAck {
    pub success: bool,
    #[serde(default)]
    pub scenario: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Locally-displayed chaos panel state
///
/// Exclusively owned by the panel instance; torn down when the panel
/// closes. Last-fetch-wins: every applied status replaces the previous
/// one, never merges across ticks.
#[derive(Debug, Clone, Default)]
pub struct ChaosDisplayState {
    pub traffic_enabled: bool,
    pub traffic_level: TrafficLevel,
    pub traffic_stats: Option<TrafficStats>,
    pub active_scenarios: BTreeSet<String>,
    pub components: ComponentHealthSet,
}

impl ChaosDisplayState {
    /// Create an initial state with nothing known yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the display state with a freshly fetched status
    pub fn apply_status(&mut self, status: ChaosStatus) {
        self.traffic_enabled = status.traffic_enabled;
        self.traffic_level = status.traffic_level;
        self.traffic_stats = status.traffic_stats;
        self.active_scenarios = status.active_scenarios.into_iter().collect();
        self.components = status.components;
    }

    /// Fold a traffic command acknowledgement into the display state
    ///
    /// Applies the acknowledged values only; the rest of the state keeps
    /// its last-known content until the next status fetch.
    pub fn apply_traffic_ack(&mut self, ack: &TrafficAck) {
        self.traffic_enabled = ack.enabled;
        self.traffic_level = ack.level;
    }

    /// Returns true if the scenario is currently active
    pub fn is_scenario_active(&self, id: &str) -> bool {
        self.active_scenarios.contains(id)
    }
}
