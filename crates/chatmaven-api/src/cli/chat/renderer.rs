//! Message rendering with the bot's appearance colors.
//!
//! Hex colors from the appearance are applied as crossterm true-color
//! styles; anything unparseable falls back to a named terminal color.

use std::collections::HashSet;

use crossterm::style::{Color, Stylize};

use chatmaven_types::appearance::{ChatAppearance, parse_hex_color};
use chatmaven_types::chat::{ChatMessage, Sender};

/// Marker shown next to bot messages when the bot has an avatar.
const AVATAR_MARKER: &str = "◉";

/// Renders chat messages as styled terminal lines.
pub struct ChatRenderer {
    bot_label: String,
    bot_color: Color,
    user_color: Color,
    accent: Color,
    has_avatar: bool,
}

impl ChatRenderer {
    pub fn new(appearance: &ChatAppearance) -> Self {
        let bot_label = if appearance.agent_title.trim().is_empty() {
            "Bot".to_string()
        } else {
            appearance.agent_title.trim().to_string()
        };

        Self {
            bot_label,
            bot_color: color_or(&appearance.chatbot_message_background, Color::Cyan),
            user_color: color_or(&appearance.user_chat_message_background, Color::Green),
            accent: color_or(&appearance.chatbot_primary_background, Color::Cyan),
            has_avatar: appearance.has_avatar(),
        }
    }

    /// Accent color for headers and prompts.
    pub fn accent(&self) -> Color {
        self.accent
    }

    /// Render a single message as one or more lines.
    pub fn format_message(&self, message: &ChatMessage) -> String {
        let label = match message.sender {
            Sender::Bot if self.has_avatar => {
                format!("{AVATAR_MARKER} {}", self.bot_label)
            }
            Sender::Bot => self.bot_label.clone(),
            Sender::User => "You".to_string(),
        };
        let color = match message.sender {
            Sender::Bot => self.bot_color,
            Sender::User => self.user_color,
        };

        let mut out = format!("  {}", label.with(color).bold());
        for line in message.text.lines() {
            out.push_str("\n    ");
            out.push_str(line);
        }
        out
    }
}

/// Resolve a hex color, falling back to `fallback`.
pub fn color_or(hex: &str, fallback: Color) -> Color {
    parse_hex_color(hex)
        .map(|(r, g, b)| Color::Rgb { r, g, b })
        .unwrap_or(fallback)
}

/// Tracks which messages are already on screen.
///
/// The message list is replaced wholesale on every refresh; only messages
/// whose id has not been printed yet are returned.
#[derive(Debug, Default)]
pub struct Transcript {
    shown: HashSet<i64>,
}

impl Transcript {
    /// Messages from `messages` not shown before, marking them shown.
    pub fn fresh<'a>(&mut self, messages: &'a [ChatMessage]) -> Vec<&'a ChatMessage> {
        messages
            .iter()
            .filter(|m| self.shown.insert(m.id))
            .collect()
    }

    /// Forget everything shown, e.g. after a new chat or a full redraw.
    pub fn reset(&mut self) {
        self.shown.clear();
    }
}
