//! Command-line interface definition for ChaosChat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, session management, and
//! the chaos control panel.

use clap::{Parser, Subcommand};

/// ChaosChat - Terminal chat client and chaos control panel
///
/// Hold conversations with the chat-demo backend and drive its
/// fault-injection scenarios from the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "chaoschat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Backend base URL override
    #[arg(short, long, env = "CHAOSCHAT_BACKEND_URL")]
    pub backend: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for ChaosChat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Resume an existing session by id
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Manage conversation sessions
    Sessions {
        /// Session management subcommand
        #[command(subcommand)]
        command: SessionCommand,
    },

    /// Drive the chaos control panel
    Chaos {
        /// Chaos panel subcommand
        #[command(subcommand)]
        command: ChaosCommand,
    },
}

/// Session management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommand {
    /// List known sessions
    List,

    /// Create a new empty session
    New,

    /// Delete a session
    Delete {
        /// Session id to delete
        id: String,
    },

    /// Show the messages of a session
    Show {
        /// Session id to show
        id: String,
    },
}

/// Chaos panel subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ChaosCommand {
    /// Fetch and display the aggregate system status once
    Status,

    /// List the available break-fix scenarios
    Scenarios,

    /// Enable or disable synthetic traffic generation
    Traffic {
        /// Turn traffic generation on
        #[arg(long, conflicts_with = "off")]
        on: bool,

        /// Turn traffic generation off
        #[arg(long)]
        off: bool,

        /// Traffic intensity: light, medium, or heavy
        #[arg(short, long, default_value = "light")]
        level: String,
    },

    /// Trigger a break-fix scenario
    Trigger {
        /// Scenario id (see `chaos scenarios`)
        scenario: String,
    },

    /// Watch the system status, polling until interrupted
    Watch,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
