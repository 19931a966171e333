//! ChaosChat - Terminal chat client and chaos control panel
//!
#![doc = "ChaosChat - Terminal chat client and chaos control panel"]
#![doc = "Main entry point for the ChaosChat application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chaoschat::cli::{ChaosCommand, Cli, Commands, SessionCommand};
use chaoschat::commands;
use chaoschat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { session } => {
            tracing::info!("Starting interactive chat mode");
            if let Some(id) = &session {
                tracing::debug!("Resuming session: {}", id);
            }
            commands::chat::run_chat(config, session).await?;
            Ok(())
        }
        Commands::Sessions { command } => match command {
            SessionCommand::List => {
                tracing::info!("Listing sessions");
                commands::sessions::list_sessions(&config).await?;
                Ok(())
            }
            SessionCommand::New => {
                tracing::info!("Creating session");
                commands::sessions::new_session(&config).await?;
                Ok(())
            }
            SessionCommand::Delete { id } => {
                tracing::info!("Deleting session: {}", id);
                commands::sessions::delete_session(&config, &id).await?;
                Ok(())
            }
            SessionCommand::Show { id } => {
                tracing::info!("Showing session: {}", id);
                commands::sessions::show_session(&config, &id).await?;
                Ok(())
            }
        },
        Commands::Chaos { command } => match command {
            ChaosCommand::Status => {
                tracing::info!("Fetching chaos status");
                commands::chaos::status(&config).await?;
                Ok(())
            }
            ChaosCommand::Scenarios => {
                commands::chaos::scenarios().await?;
                Ok(())
            }
            ChaosCommand::Traffic { on, off, level } => {
                // `--on` and `--off` are mutually exclusive at the parser;
                // neither flag means "off".
                let enabled = on && !off;
                tracing::info!("Setting traffic generation: enabled={}", enabled);
                commands::chaos::traffic(&config, enabled, &level).await?;
                Ok(())
            }
            ChaosCommand::Trigger { scenario } => {
                tracing::info!("Triggering scenario: {}", scenario);
                commands::chaos::trigger(&config, &scenario).await?;
                Ok(())
            }
            ChaosCommand::Watch => {
                tracing::info!("Starting chaos watch mode");
                commands::chaos::watch(&config).await?;
                Ok(())
            }
        },
    }
}

/// Initialize the tracing subscriber
///
/// Respects `RUST_LOG` when set; otherwise defaults to info-level output
/// for this crate, or debug-level with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "chaoschat=debug"
    } else {
        "chaoschat=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
