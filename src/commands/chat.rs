//! Interactive chat loop
//!
//! Runs a readline-based conversation against the backend. Slash commands
//! manage sessions without leaving the loop; everything else is submitted
//! as a prompt through the chat orchestrator.

use crate::chat::ChatOrchestrator;
use crate::config::Config;
use crate::error::{ChaosChatError, Result};
use crate::session::{format_relative_age, SessionStore, Timeline};

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Slash commands recognized inside the chat loop
#[derive(Debug, Clone, PartialEq, Eq)]
enum SlashCommand {
    /// Start a fresh conversation
    New,
    /// List known sessions
    Sessions,
    /// Switch to another session
    Switch(String),
    /// Delete a session (current one if no id given)
    Delete(Option<String>),
    /// Show available commands
    Help,
    /// Leave the chat loop
    Exit,
    /// Not a slash command
    None,
}

fn parse_slash_command(input: &str) -> SlashCommand {
    let mut parts = input.split_whitespace();
    match parts.next() {
        Some("/new") => SlashCommand::New,
        Some("/sessions") => SlashCommand::Sessions,
        Some("/switch") => match parts.next() {
            Some(id) => SlashCommand::Switch(id.to_string()),
            None => SlashCommand::Help,
        },
        Some("/delete") => SlashCommand::Delete(parts.next().map(String::from)),
        Some("/help") => SlashCommand::Help,
        Some("/quit") | Some("/exit") => SlashCommand::Exit,
        _ => SlashCommand::None,
    }
}

fn print_help() {
    println!("Available commands:");
    println!("  /new           Start a fresh conversation");
    println!("  /sessions      List known sessions");
    println!("  /switch <id>   Switch to another session");
    println!("  /delete [id]   Delete a session (current if omitted)");
    println!("  /help          Show this help");
    println!("  /quit          Exit");
}

/// Start the interactive chat loop
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `session` - Optional session id to resume
///
/// # Errors
///
/// Returns error if the gateway cannot be built or the resumed session
/// does not exist; in-loop errors are reported and the loop continues
pub async fn run_chat(config: Config, session: Option<String>) -> Result<()> {
    let gateway = super::build_gateway(&config)?;
    let store = Arc::new(Mutex::new(SessionStore::new()));
    let timeline = Arc::new(Mutex::new(Timeline::new()));
    let orchestrator = ChatOrchestrator::new(
        gateway,
        store,
        timeline,
        Duration::from_millis(config.chat.title_delay_ms),
    );

    if let Err(e) = orchestrator.refresh_sessions().await {
        tracing::warn!("Initial session listing failed: {}", e);
        println!(
            "{}",
            "Could not list sessions; starting with a blank slate.".yellow()
        );
    }

    if let Some(id) = session {
        orchestrator.select_session(Some(id.as_str())).await?;
        println!("Resumed session {}", id.bold());
        for message in orchestrator.messages() {
            print_exchange(&message.prompt, &message.reply, false);
        }
    } else {
        println!("{}", "New conversation. Type /help for commands.".bold());
    }

    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline(&"you> ".cyan().bold().to_string()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                rl.add_history_entry(trimmed)?;

                match parse_slash_command(trimmed) {
                    SlashCommand::New => {
                        orchestrator.start_new_chat();
                        println!("{}", "Started a new conversation.".bold());
                        continue;
                    }
                    SlashCommand::Sessions => {
                        print_session_list(&orchestrator);
                        continue;
                    }
                    SlashCommand::Switch(id) => {
                        match orchestrator.select_session(Some(id.as_str())).await {
                            Ok(()) => {
                                println!("Switched to session {}", id.bold());
                                for message in orchestrator.messages() {
                                    print_exchange(&message.prompt, &message.reply, false);
                                }
                            }
                            Err(e) => print_error(&e),
                        }
                        continue;
                    }
                    SlashCommand::Delete(id) => {
                        let target = id.or_else(|| orchestrator.current_session());
                        let Some(target) = target else {
                            println!("No session selected; nothing to delete.");
                            continue;
                        };
                        match orchestrator.remove_session(&target).await {
                            Ok(cleared) => {
                                println!("Deleted session {}", target);
                                if cleared {
                                    println!("{}", "Started a new conversation.".bold());
                                }
                            }
                            Err(e) => print_error(&e),
                        }
                        continue;
                    }
                    SlashCommand::Help => {
                        print_help();
                        continue;
                    }
                    SlashCommand::Exit => break,
                    SlashCommand::None => {}
                }

                match orchestrator.submit(trimmed).await {
                    Ok(outcome) => {
                        print_exchange(trimmed, &outcome.reply, outcome.no_answer);
                    }
                    Err(e) => print_error(&e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("(Ctrl-C; /quit to exit)");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                return Err(e.into());
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn print_exchange(prompt: &str, reply: &str, no_answer: bool) {
    tracing::debug!("Exchange: {} chars prompt, {} chars reply", prompt.len(), reply.len());
    println!("{} {}", "bot>".green().bold(), reply);
    if no_answer {
        println!("{}", "(the assistant had no answer for this one)".dimmed());
    }
    println!();
}

fn print_session_list(orchestrator: &ChatOrchestrator) {
    let sessions = orchestrator.sessions();
    if sessions.is_empty() {
        println!("No sessions yet.");
        return;
    }

    let current = orchestrator.current_session();
    for session in &sessions {
        let marker = if current.as_deref() == Some(session.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {}  {}  ({} messages, {})",
            marker,
            session.id,
            session.display_title().bold(),
            session.message_count,
            format_relative_age(&session.updated_at)
        );
    }
}

fn print_error(error: &anyhow::Error) {
    match error.downcast_ref::<ChaosChatError>() {
        Some(ChaosChatError::Validation(msg)) => println!("{} {}", "Invalid:".yellow(), msg),
        Some(ChaosChatError::NotFound(what)) => println!("{} {}", "Not found:".yellow(), what),
        Some(ChaosChatError::Busy(msg)) => println!("{} {}", "Busy:".yellow(), msg),
        _ => println!("{} {}", "Error:".red().bold(), error),
    }
}
