//! Chat session and message types for the widget client.
//!
//! A conversation is scoped by a server-assigned [`ChatSessionId`]. Messages
//! are local projections of server history: HTML-stripped text plus a
//! two-way sender classification.

use serde::{Deserialize, Serialize};

use crate::wire::null_as_empty;

use std::fmt;
use std::str::FromStr;

/// Server-assigned identifier of a chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatSessionId(pub i64);

impl fmt::Display for ChatSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChatSessionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<i64> for ChatSessionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Synthesize the sender-unique identifier for a bot + session pair.
///
/// Both the bot greeting and end-user messages carry the same UID; they are
/// told apart only by [`SenderType`].
pub fn sender_uid(bot_unique_id: &str, session_id: ChatSessionId) -> String {
    format!("{bot_unique_id}_cs_{session_id}_enduser")
}

/// Sender type as understood by the conversation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SenderType {
    Bot,
    EndUser,
}

impl SenderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SenderType::Bot => "Bot",
            SenderType::EndUser => "EndUser",
        }
    }
}

impl fmt::Display for SenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who a displayed message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Map the service's free-form `senderType` field.
    ///
    /// Only the exact string `"Bot"` is a bot; anything else is the user.
    pub fn from_sender_type(sender_type: &str) -> Self {
        if sender_type == SenderType::Bot.as_str() {
            Sender::Bot
        } else {
            Sender::User
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

/// A message as returned by `GetMessages`, before local transformation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMessage {
    #[serde(rename = "messageID", default)]
    pub message_id: Option<i64>,
    #[serde(rename = "chatSessionID", default)]
    pub chat_session_id: Option<i64>,
    #[serde(rename = "endUserID", default)]
    pub end_user_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message_text: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sender_type: String,
    #[serde(rename = "senderID", default)]
    pub sender_id: Option<i64>,
    #[serde(rename = "senderUID", default)]
    pub sender_uid: Option<String>,
    #[serde(default)]
    pub sent_date: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

/// A message in the local, displayable conversation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Server `messageID`, or the 1-based position when the server omits it.
    pub id: i64,
    /// Message text with HTML markup removed.
    pub text: String,
    pub sender: Sender,
}

/// An outgoing `InsertMessage` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub session_id: ChatSessionId,
    pub sender_type: SenderType,
    pub sender_id: i64,
    pub text: String,
    pub sender_uid: String,
}

impl OutgoingMessage {
    /// Build a message for `session_id` with the standard sender id (`0`)
    /// and the synthesized sender UID.
    pub fn new(
        bot_unique_id: &str,
        session_id: ChatSessionId,
        sender_type: SenderType,
        text: impl Into<String>,
    ) -> Self {
        Self {
            session_id,
            sender_type,
            sender_id: 0,
            text: text.into(),
            sender_uid: sender_uid(bot_unique_id, session_id),
        }
    }
}

/// Which of the two widget screens is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Landing,
    Chat,
}

/// Observable lifecycle of the conversation's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoSession,
    /// A `CreateSession` call is in flight.
    Pending,
    Active(ChatSessionId),
}

impl SessionState {
    pub fn session_id(&self) -> Option<ChatSessionId> {
        match self {
            SessionState::Active(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::NoSession => write!(f, "no session"),
            SessionState::Pending => write!(f, "pending"),
            SessionState::Active(id) => write!(f, "active ({id})"),
        }
    }
}
