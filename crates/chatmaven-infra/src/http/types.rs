//! ChatMaven REST API wire types.
//!
//! Request bodies use the service's exact (mixed-case) field names. These
//! are NOT the domain types from chatmaven-types -- the client converts
//! between the two.

use serde::{Deserialize, Serialize};

use chatmaven_types::appearance::ChatAppearance;
use chatmaven_types::chat::OutgoingMessage;

/// Standard response wrapper: `{ success, message, data }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Human-readable failure reason for `success: false` responses.
    pub fn failure_reason(&self) -> String {
        self.message
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "no reason given".to_string())
    }
}

/// `data` payload of the appearance endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceData {
    pub chat_appearance: Option<ChatAppearance>,
}

/// Body of `POST /Chats/InsertChatSession`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionRequest<'a> {
    #[serde(rename = "botUniqueID")]
    pub bot_unique_id: &'a str,
    /// Always null: the widget has no end-user identity.
    #[serde(rename = "endUserID")]
    pub end_user_id: Option<i64>,
    #[serde(rename = "messageText")]
    pub message_text: &'a str,
}

/// Body of `POST /Chats/InsertMessage`.
#[derive(Debug, Clone, Serialize)]
pub struct InsertMessageRequest<'a> {
    #[serde(rename = "chatSessionID")]
    pub chat_session_id: i64,
    #[serde(rename = "senderType")]
    pub sender_type: &'static str,
    #[serde(rename = "senderID")]
    pub sender_id: i64,
    #[serde(rename = "messageText")]
    pub message_text: &'a str,
    #[serde(rename = "SenderUID")]
    pub sender_uid: &'a str,
}

impl<'a> From<&'a OutgoingMessage> for InsertMessageRequest<'a> {
    fn from(message: &'a OutgoingMessage) -> Self {
        Self {
            chat_session_id: message.session_id.0,
            sender_type: message.sender_type.as_str(),
            sender_id: message.sender_id,
            message_text: &message.text,
            sender_uid: &message.sender_uid,
        }
    }
}
