//! Session management commands
//!
//! Listing, creating, deleting, and inspecting conversation sessions
//! directly from the command line, without entering the interactive chat
//! loop.

use crate::config::Config;
use crate::error::Result;
use crate::gateway::Gateway;
use crate::session::format_relative_age;

use colored::Colorize;
use prettytable::{cell, row, Table};

/// List known sessions, newest first as the backend orders them
///
/// # Arguments
///
/// * `config` - Configuration containing backend settings
///
/// # Errors
///
/// Returns error if the backend cannot be reached
pub async fn list_sessions(config: &Config) -> Result<()> {
    let gateway = super::build_gateway(config)?;
    let sessions = gateway.list_sessions().await?;

    if sessions.is_empty() {
        println!("No sessions yet. Start one with `chaoschat chat`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row![b => "ID", "Title", "Messages", "Updated"]);
    for session in &sessions {
        table.add_row(row![
            session.id,
            session.display_title(),
            session.message_count,
            format_relative_age(&session.updated_at)
        ]);
    }
    table.printstd();
    Ok(())
}

/// Create a new empty session
pub async fn new_session(config: &Config) -> Result<()> {
    let gateway = super::build_gateway(config)?;
    let session = gateway.create_session().await?;

    tracing::info!("Created session {}", session.id);
    println!("{} {}", "Created session".green(), session.id);
    Ok(())
}

/// Delete a session by id
///
/// # Errors
///
/// Returns error if the session does not exist or the backend cannot be
/// reached
pub async fn delete_session(config: &Config, id: &str) -> Result<()> {
    let gateway = super::build_gateway(config)?;
    gateway.delete_session(id).await?;

    tracing::info!("Deleted session {}", id);
    println!("{} {}", "Deleted session".yellow(), id);
    Ok(())
}

/// Show the full message history of a session
///
/// # Errors
///
/// Returns error if the session does not exist or the backend cannot be
/// reached
pub async fn show_session(config: &Config, id: &str) -> Result<()> {
    let gateway = super::build_gateway(config)?;
    let messages = gateway.session_messages(id).await?;

    if messages.is_empty() {
        println!("Session {} has no messages.", id);
        return Ok(());
    }

    for message in &messages {
        println!(
            "{} {}",
            "you>".cyan().bold(),
            message.prompt
        );
        println!("{} {}", "bot>".green().bold(), message.reply);
        println!("{}", format_relative_age(&message.created_at).dimmed());
        println!();
    }
    Ok(())
}
