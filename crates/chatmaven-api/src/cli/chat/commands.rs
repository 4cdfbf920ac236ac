//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and stand in for the widget's buttons.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Open the conversation screen.
    Open,
    /// Return to the landing screen.
    Back,
    /// Forget the current conversation and start over.
    New,
    /// Fill in and submit the contact form.
    Contact,
    /// Re-fetch and redraw the whole conversation.
    History,
    /// Clear the terminal screen.
    Clear,
    /// Close the widget.
    Exit,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/open" | "/chat" => Some(ChatCommand::Open),
        "/back" | "/home" => Some(ChatCommand::Back),
        "/new" => Some(ChatCommand::New),
        "/contact" => Some(ChatCommand::Contact),
        "/history" | "/refresh" => Some(ChatCommand::History),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Help text listing all available commands.
pub fn help_lines() -> Vec<String> {
    let entries = [
        ("/open", "Open the conversation"),
        ("/back", "Return to the welcome screen"),
        ("/new", "Start a new chat"),
        ("/contact", "Send us a message"),
        ("/history", "Reload the conversation"),
        ("/clear", "Clear the screen"),
        ("/help", "Show this help message"),
        ("/exit", "Close the chat"),
    ];

    let mut lines = vec![String::new(), format!("  {}", style("Available commands:").bold())];
    lines.push(String::new());
    for (cmd, desc) in entries {
        lines.push(format!("  {:<10} {}", style(cmd).cyan(), desc));
    }
    lines.push(String::new());
    lines.push(format!(
        "  {}",
        style("Enter on an empty line resends a message that failed to send. Ctrl+D to exit.").dim()
    ));
    lines.push(String::new());
    lines
}
