//! Widget appearance configuration served by the conversation service.

use serde::{Deserialize, Serialize};

use crate::wire::null_as_empty;

/// Visual/theme configuration for the landing bubble and chat window.
///
/// Every field defaults to an empty string, whether the key is missing or
/// `null`, so a partially populated response still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatAppearance {
    #[serde(deserialize_with = "null_as_empty")]
    pub agent_title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub welcome_message: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub chatbot_primary_background: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub chat_window_background: String,
    // The service spells this field "chatboat".
    #[serde(rename = "chatboatMessageBackground", deserialize_with = "null_as_empty")]
    pub chatbot_message_background: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub user_chat_message_background: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub send_message_button: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub placeholder: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub dashboard_bg_color: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub dashboard_header_welcome_text: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub dashboard_header_welcome_emoji: String,
    /// Base64-encoded PNG avatar, empty when the bot has none.
    #[serde(deserialize_with = "null_as_empty")]
    pub avatar: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub avatar_url: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub chat_bubble_title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub chat_bubble_introductory_message: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub chat_bubble_button_text: String,
}

impl ChatAppearance {
    pub fn has_avatar(&self) -> bool {
        !self.avatar.is_empty() || !self.avatar_url.is_empty()
    }
}

/// Parse a `#rrggbb` (or `#rgb`) color string into RGB components.
///
/// Returns `None` for anything else (named colors, gradients, empty).
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            let mut channels = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            let r = channels.next()??;
            let g = channels.next()??;
            let b = channels.next()??;
            Some((r, g, b))
        }
        _ => None,
    }
}
