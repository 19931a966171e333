//! Chaos panel commands
//!
//! One-shot status and scenario commands plus a `watch` mode that keeps
//! the panel's polling loop alive until interrupted. The watch loop owns
//! its poller; closing the panel (Ctrl-C) stops polling deterministically
//! before the handler returns.

use crate::chaos::{
    catalog, ChaosCommandIssuer, ChaosDisplayState, ChaosPoller, ComponentHealth, TrafficLevel,
};
use crate::config::Config;
use crate::error::{ChaosChatError, Result};
use crate::gateway::Gateway;

use colored::Colorize;
use prettytable::{cell, row, Table};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Fetch and display the aggregate system status once
///
/// # Errors
///
/// Returns error if the backend cannot be reached or replies with a
/// malformed status
pub async fn status(config: &Config) -> Result<()> {
    let gateway = super::build_gateway(config)?;
    let status = gateway.chaos_status().await?;

    let mut state = ChaosDisplayState::new();
    state.apply_status(status);
    render_state(&state);
    Ok(())
}

/// List the available break-fix scenarios and quick actions
pub async fn scenarios() -> Result<()> {
    let mut table = Table::new();
    table.add_row(row![b => "ID", "Name", "Severity", "Description"]);
    for scenario in catalog::scenarios() {
        table.add_row(row![
            scenario.id,
            scenario.name,
            scenario.severity,
            scenario.description
        ]);
    }
    table.printstd();

    println!();
    println!("Quick actions (always repeatable):");
    for action in catalog::quick_actions() {
        println!("  {} - {}", action.id.bold(), action.description);
    }
    Ok(())
}

/// Enable or disable synthetic traffic generation
///
/// # Arguments
///
/// * `config` - Configuration containing backend settings
/// * `enabled` - Desired traffic state
/// * `level` - Traffic intensity as given on the command line
///
/// # Errors
///
/// Returns error for an unknown level or a failed backend call
pub async fn traffic(config: &Config, enabled: bool, level: &str) -> Result<()> {
    let level: TrafficLevel = level
        .parse()
        .map_err(ChaosChatError::Validation)?;

    let gateway = super::build_gateway(config)?;
    let state = Arc::new(Mutex::new(ChaosDisplayState::new()));
    let issuer = ChaosCommandIssuer::new(gateway, Arc::clone(&state));

    let acknowledged = issuer.set_traffic(enabled, level).await?;
    if acknowledged {
        println!(
            "{} (level: {})",
            "Traffic generation enabled".green(),
            state.lock().expect("chaos state lock poisoned").traffic_level
        );
    } else {
        println!("{}", "Traffic generation disabled".yellow());
    }
    Ok(())
}

/// Trigger a break-fix scenario or quick action
///
/// # Errors
///
/// Returns error for unknown or already-active scenarios, or a failed
/// backend call
pub async fn trigger(config: &Config, scenario_id: &str) -> Result<()> {
    let gateway = super::build_gateway(config)?;
    let state = Arc::new(Mutex::new(ChaosDisplayState::new()));
    let issuer = ChaosCommandIssuer::new(Arc::clone(&gateway), Arc::clone(&state));

    // Seed the active-scenario set so repeat triggers are caught locally.
    issuer.refresh_status().await;

    let ack = issuer.trigger(scenario_id).await?;
    if ack.success {
        println!("{} {}", "Triggered".green().bold(), scenario_id);
        if let Some(description) = &ack.description {
            println!("  {}", description);
        }
        if let Some(output) = &ack.output {
            println!("  {}", output.dimmed());
        }
    } else {
        let detail = ack.error.as_deref().unwrap_or("no detail given");
        println!(
            "{} {}: {}",
            "Trigger failed".red().bold(),
            scenario_id,
            detail
        );
    }
    Ok(())
}

/// Watch the system status, polling until interrupted
///
/// Starts the panel's polling loop against a fresh display state and
/// re-renders on every interval until Ctrl-C. The poller is stopped
/// before returning, so no fetch outlives the panel.
pub async fn watch(config: &Config) -> Result<()> {
    let gateway = super::build_gateway(config)?;
    let state = Arc::new(Mutex::new(ChaosDisplayState::new()));
    let mut poller = ChaosPoller::new(gateway, Arc::clone(&state));

    let interval = Duration::from_millis(config.chaos.poll_interval_ms);
    poller.start(interval);
    println!(
        "Watching chaos status every {}ms. Press Ctrl-C to stop.",
        config.chaos.poll_interval_ms
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = tokio::time::sleep(interval) => {
                let snapshot = state.lock().expect("chaos state lock poisoned").clone();
                println!();
                render_state(&snapshot);
            }
        }
    }

    poller.stop();
    tracing::info!("Chaos watch stopped");
    Ok(())
}

/// Render a display state snapshot to stdout
fn render_state(state: &ChaosDisplayState) {
    let traffic = if state.traffic_enabled {
        format!("on ({})", state.traffic_level).green()
    } else {
        "off".to_string().dimmed()
    };
    println!("Traffic: {}", traffic);

    if let Some(stats) = &state.traffic_stats {
        println!(
            "  {} requests, {:.1}% success",
            stats.total, stats.success_rate
        );
    }

    if state.active_scenarios.is_empty() {
        println!("Active scenarios: {}", "none".dimmed());
    } else {
        let active: Vec<&str> = state.active_scenarios.iter().map(String::as_str).collect();
        println!("Active scenarios: {}", active.join(", ").red());
    }

    println!(
        "Components: backend {} | worker {} | database {} | rabbitmq {}",
        paint_health(state.components.backend),
        paint_health(state.components.worker),
        paint_health(state.components.database),
        paint_health(state.components.rabbitmq)
    );
}

fn paint_health(health: ComponentHealth) -> colored::ColoredString {
    match health {
        ComponentHealth::Healthy => health.to_string().green(),
        ComponentHealth::Unhealthy => health.to_string().red(),
        ComponentHealth::Unknown => health.to_string().yellow(),
    }
}
