//! Landing and conversation screen headers.

use console::style;
use crossterm::style::Stylize;

use chatmaven_types::appearance::ChatAppearance;
use chatmaven_types::chat::SessionState;

use super::renderer::ChatRenderer;

/// The landing screen: welcome header, the chat bubble and the entry hint.
pub fn landing_lines(appearance: &ChatAppearance, renderer: &ChatRenderer) -> Vec<String> {
    let header = [
        appearance.dashboard_header_welcome_emoji.trim(),
        appearance.dashboard_header_welcome_text.trim(),
    ]
    .iter()
    .filter(|s| !s.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" ");
    let header = if header.is_empty() {
        "Welcome!".to_string()
    } else {
        header
    };

    let mut lines = vec![
        String::new(),
        format!("  {}", header.with(renderer.accent()).bold()),
    ];
    if !appearance.welcome_message.trim().is_empty() {
        lines.push(format!("  {}", style(appearance.welcome_message.trim()).dim()));
    }
    lines.push(String::new());

    if !appearance.chat_bubble_title.trim().is_empty() {
        lines.push(format!("  {}", style(appearance.chat_bubble_title.trim()).bold()));
    }
    if !appearance.chat_bubble_introductory_message.trim().is_empty() {
        lines.push(format!("  {}", appearance.chat_bubble_introductory_message.trim()));
    }

    let button = if appearance.chat_bubble_button_text.trim().is_empty() {
        "Chat with us"
    } else {
        appearance.chat_bubble_button_text.trim()
    };
    lines.push(format!(
        "  [ {} ]  {}",
        button.with(renderer.accent()),
        style("/open, or just type a message").dim()
    ));
    lines.push(format!(
        "  {}",
        style("/contact to leave a message, /help for commands, Ctrl+D to exit").dim()
    ));
    lines.push(String::new());
    lines
}

/// Header printed when the conversation screen opens.
pub fn chat_header_lines(
    appearance: &ChatAppearance,
    renderer: &ChatRenderer,
    state: SessionState,
) -> Vec<String> {
    let title = if appearance.agent_title.trim().is_empty() {
        "Chat"
    } else {
        appearance.agent_title.trim()
    };

    vec![
        String::new(),
        format!(
            "  {}  {}",
            title.with(renderer.accent()).bold(),
            style(format!("({state})")).dim()
        ),
        format!("  {}", style("/back to return, /new to start over").dim()),
        format!("  {}", style("---").dim()),
    ]
}
