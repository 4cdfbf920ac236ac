//! `history` command: print the messages of one chat session.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use chatmaven_core::chat::history::fetch_history;
use chatmaven_types::chat::{ChatMessage, ChatSessionId, Sender};

use crate::state::AppState;

use super::spinner;

/// Fetch and print a session's history.
///
/// # Examples
///
/// ```bash
/// cmaven history --session 449
/// cmaven history --session 449 --json
/// ```
pub async fn show_history(state: &AppState, session_id: ChatSessionId, json: bool) -> Result<()> {
    let progress = (!json).then(|| spinner("Fetching messages..."));
    let result = fetch_history(state.session.service(), session_id).await;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }
    let messages =
        result.with_context(|| format!("Failed to fetch history for session {session_id}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!();
        println!(
            "  {} Session {} has no messages.",
            style("i").blue().bold(),
            style(session_id).cyan()
        );
        println!();
        return Ok(());
    }

    println!();
    println!("{}", history_table(&messages));
    println!(
        "  {} message(s) in session {}",
        messages.len(),
        style(session_id).cyan()
    );
    println!();

    Ok(())
}

fn history_table(messages: &[ChatMessage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("From").fg(Color::White),
        Cell::new("Message").fg(Color::White),
    ]);

    for message in messages {
        let from = match message.sender {
            Sender::Bot => Cell::new("Bot").fg(Color::Cyan),
            Sender::User => Cell::new("You").fg(Color::Green),
        };
        table.add_row(vec![
            Cell::new(message.id).fg(Color::DarkGrey),
            from,
            Cell::new(&message.text),
        ]);
    }

    table
}
