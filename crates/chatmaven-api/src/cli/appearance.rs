//! Widget appearance: fetching with fallback, and the `appearance` command.

use anyhow::Result;
use console::style;
use tracing::warn;

use chatmaven_core::remote::ConversationService;
use chatmaven_types::appearance::{ChatAppearance, parse_hex_color};

use crate::state::AppState;

use super::spinner;

/// Fetch the bot's appearance, falling back to the default on any failure.
pub async fn load_appearance(state: &AppState, show_spinner: bool) -> ChatAppearance {
    let progress = show_spinner.then(|| spinner("Loading widget..."));

    let result = state.session.service().get_appearance().await;

    if let Some(progress) = progress {
        progress.finish_and_clear();
    }

    match result {
        Ok(appearance) => appearance,
        Err(e) => {
            warn!(error = %e, "Failed to load widget appearance, using defaults");
            ChatAppearance::default()
        }
    }
}

/// Print the fetched appearance.
///
/// # Examples
///
/// ```bash
/// cmaven appearance
/// cmaven appearance --json
/// ```
pub async fn show_appearance(state: &AppState, json: bool) -> Result<()> {
    let appearance = load_appearance(state, !json).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&appearance)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style("Bot:").bold(),
        style(&state.config.bot_unique_id).cyan()
    );
    println!(
        "  {} {}",
        style("Config:").bold(),
        style(state.data_dir.join("config.toml").display()).dim()
    );
    println!();

    let texts = [
        ("Agent title", &appearance.agent_title),
        ("Welcome message", &appearance.welcome_message),
        ("Header text", &appearance.dashboard_header_welcome_text),
        ("Header emoji", &appearance.dashboard_header_welcome_emoji),
        ("Bubble title", &appearance.chat_bubble_title),
        ("Bubble intro", &appearance.chat_bubble_introductory_message),
        ("Bubble button", &appearance.chat_bubble_button_text),
        ("Placeholder", &appearance.placeholder),
        ("Avatar URL", &appearance.avatar_url),
    ];
    for (label, value) in texts {
        println!("  {:<16} {}", style(label).bold(), display_or_dash(value));
    }

    println!();
    let colors = [
        ("Primary", &appearance.chatbot_primary_background),
        ("Window", &appearance.chat_window_background),
        ("Bot message", &appearance.chatbot_message_background),
        ("User message", &appearance.user_chat_message_background),
        ("Send button", &appearance.send_message_button),
        ("Dashboard", &appearance.dashboard_bg_color),
    ];
    for (label, value) in colors {
        println!(
            "  {:<16} {} {}",
            style(label).bold(),
            swatch(value),
            display_or_dash(value)
        );
    }
    println!();

    Ok(())
}

fn display_or_dash(value: &str) -> String {
    if value.is_empty() {
        format!("{}", style("-").dim())
    } else {
        value.to_string()
    }
}

/// A two-cell true-color block for hex colors, blank otherwise.
fn swatch(value: &str) -> String {
    use crossterm::style::{Color, Stylize};

    match parse_hex_color(value) {
        Some((r, g, b)) => format!("{}", "  ".on(Color::Rgb { r, g, b })),
        None => "  ".to_string(),
    }
}
