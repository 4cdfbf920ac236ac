//! CLI command definitions for the `cmaven` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod appearance;
pub mod chat;
pub mod contact;
pub mod history;

use std::time::Duration;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};

use chatmaven_types::chat::ChatSessionId;

/// Chat with a ChatMaven bot from the terminal.
#[derive(Parser)]
#[command(name = "cmaven", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans via OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Conversation service base URL (overrides config.toml).
    #[arg(long, global = true, env = "CHATMAVEN_BASE_URL")]
    pub base_url: Option<String>,

    /// Bot unique identifier (overrides config.toml).
    #[arg(long, global = true, env = "CHATMAVEN_BOT_ID")]
    pub bot: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive chat widget.
    Chat {
        /// Continue an existing chat session by ID.
        #[arg(long)]
        resume: Option<ChatSessionId>,
    },

    /// Print the messages of a chat session.
    History {
        /// Chat session ID.
        #[arg(long, short)]
        session: ChatSessionId,
    },

    /// Show the bot's widget appearance.
    Appearance,

    /// Send a message through the contact form.
    Contact {
        /// Your name.
        #[arg(long)]
        name: Option<String>,

        /// Your email address.
        #[arg(long)]
        email: Option<String>,

        /// Your phone number (digits only).
        #[arg(long)]
        phone: Option<String>,

        /// The message to send.
        #[arg(long)]
        message: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Start a steady-ticking spinner with the given message.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
