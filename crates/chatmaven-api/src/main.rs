//! ChatMaven terminal widget entry point.
//!
//! Binary name: `cmaven`
//!
//! Parses CLI arguments, sets up tracing, loads configuration and wires the
//! conversation service, then dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::{AppState, ConfigOverrides};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = chatmaven_observe::verbosity_filter(cli.verbose, cli.quiet);
    chatmaven_observe::init_tracing(filter, cli.otel).map_err(|e| anyhow::anyhow!(e))?;

    let result = run(cli).await;

    chatmaven_observe::shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "cmaven", &mut std::io::stdout());
        return Ok(());
    }

    let overrides = ConfigOverrides {
        base_url: cli.base_url.clone(),
        bot_unique_id: cli.bot.clone(),
        resume_session_id: match &cli.command {
            Commands::Chat { resume } => *resume,
            _ => None,
        },
    };
    let state = AppState::init(overrides).await?;

    match cli.command {
        Commands::Chat { .. } => {
            cli::chat::loop_runner::run_chat_loop(&state).await?;
        }

        Commands::History { session } => {
            cli::history::show_history(&state, session, cli.json).await?;
        }

        Commands::Appearance => {
            cli::appearance::show_appearance(&state, cli.json).await?;
        }

        Commands::Contact {
            name,
            email,
            phone,
            message,
        } => {
            cli::contact::submit_contact(&state, name, email, phone, message, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
