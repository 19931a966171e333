//! Static catalog of break-fix scenarios
//!
//! The catalog is defined client-side and is independent of backend state;
//! it enumerates what the panel can trigger, while `activeScenarios` from
//! the status endpoint says what currently is triggered.

use std::fmt;

/// Scenario severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A named fault-injection action exposed by the chaos panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    /// Identifier sent to the backend
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// What the scenario does to the system
    pub description: &'static str,
    pub severity: Severity,
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        id: "worker-crash",
        name: "Worker Crash",
        description: "Scale worker to 0 replicas",
        severity: Severity::High,
    },
    Scenario {
        id: "db-slow",
        name: "Database Slowdown",
        description: "Inject query delays",
        severity: Severity::Medium,
    },
    Scenario {
        id: "memory-pressure",
        name: "Memory Pressure",
        description: "Reduce backend memory limits",
        severity: Severity::High,
    },
    Scenario {
        id: "queue-backup",
        name: "Queue Backup",
        description: "Pause message processing",
        severity: Severity::Medium,
    },
    Scenario {
        id: "api-errors",
        name: "API Errors",
        description: "Simulate upstream API failures",
        severity: Severity::Low,
    },
    Scenario {
        id: "network-latency",
        name: "Network Latency",
        description: "Add 200ms+ delays",
        severity: Severity::Medium,
    },
];

const QUICK_ACTIONS: &[Scenario] = &[
    Scenario {
        id: "heal-all",
        name: "Heal All",
        description: "Restore all services to healthy state",
        severity: Severity::Low,
    },
    Scenario {
        id: "restart-all",
        name: "Restart Services",
        description: "Rolling-restart all services",
        severity: Severity::Low,
    },
];

/// The break-fix scenarios, in panel display order
pub fn scenarios() -> &'static [Scenario] {
    SCENARIOS
}

/// Quick actions that clear or reset scenarios
///
/// Unlike break-fix scenarios these are repeatable: they are never
/// subject to the already-active trigger guard.
pub fn quick_actions() -> &'static [Scenario] {
    QUICK_ACTIONS
}

/// Look up any triggerable entry (scenario or quick action) by id
pub fn find(id: &str) -> Option<&'static Scenario> {
    SCENARIOS
        .iter()
        .chain(QUICK_ACTIONS.iter())
        .find(|s| s.id == id)
}

/// Returns true if the id names a quick action rather than a scenario
pub fn is_quick_action(id: &str) -> bool {
    QUICK_ACTIONS.iter().any(|s| s.id == id)
}
