//! Widget configuration types.
//!
//! `WidgetConfig` represents the `config.toml` in the data directory that
//! points the client at a conversation service and bot. All fields have
//! defaults matching the hosted ChatMaven service.

use serde::{Deserialize, Serialize};

use crate::chat::ChatSessionId;

/// Default conversation service base URL.
pub const DEFAULT_BASE_URL: &str = "https://api2.chatmaven.ai";

/// Default bot unique identifier.
pub const DEFAULT_BOT_UNIQUE_ID: &str = "iy45ytVZo40Ii1dzT78EJDpv3";

/// Greeting inserted as the first bot message of every new chat session.
pub const DEFAULT_GREETING: &str = "I am a Chatbot!";

/// Greeting inserted when the contact form opens a session.
pub const DEFAULT_CONTACT_GREETING: &str = "I am a Chatbot! How may I help you? \r\n";

/// When the pending input text is cleared after a send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputClearPolicy {
    /// Clear only once the user's message was stored; keep it for a resend
    /// otherwise.
    #[default]
    OnSuccess,
    /// Clear as soon as the post was attempted, even if it failed.
    AfterAttempt,
}

/// Top-level configuration for the widget client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_bot_unique_id")]
    pub bot_unique_id: String,

    /// Explicit API key. When absent the bot unique id is sent instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_greeting")]
    pub greeting_text: String,

    #[serde(default)]
    pub input_clear_policy: InputClearPolicy,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Session whose history is loaded (and continued) on startup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_session_id: Option<ChatSessionId>,

    #[serde(default)]
    pub contact: ContactConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_bot_unique_id() -> String {
    DEFAULT_BOT_UNIQUE_ID.to_string()
}

fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            bot_unique_id: default_bot_unique_id(),
            api_key: None,
            greeting_text: default_greeting(),
            input_clear_policy: InputClearPolicy::default(),
            request_timeout_secs: default_request_timeout_secs(),
            resume_session_id: None,
            contact: ContactConfig::default(),
        }
    }
}

/// Texts used by the contact form flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactConfig {
    #[serde(default = "default_contact_greeting")]
    pub greeting_text: String,

    #[serde(default = "default_header_text")]
    pub header_text: String,

    #[serde(default = "default_body_text")]
    pub body_text: String,
}

fn default_contact_greeting() -> String {
    DEFAULT_CONTACT_GREETING.to_string()
}

fn default_header_text() -> String {
    "Message Sent".to_string()
}

fn default_body_text() -> String {
    "Thank you for your message, we will get back to you as soon as possible.".to_string()
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            greeting_text: default_contact_greeting(),
            header_text: default_header_text(),
            body_text: default_body_text(),
        }
    }
}
