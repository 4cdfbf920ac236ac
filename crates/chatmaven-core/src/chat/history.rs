//! Server history -> local message list transformation.

use std::sync::LazyLock;

use regex::Regex;

use chatmaven_types::chat::{ChatMessage, ChatSessionId, RemoteMessage, Sender};
use chatmaven_types::error::ChatError;

use crate::remote::ConversationService;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("HTML tag pattern is valid"));

/// Remove every `<...>` tag from `text`, keeping the text between tags.
pub fn strip_html(text: &str) -> String {
    HTML_TAG.replace_all(text, "").into_owned()
}

/// Transform server messages into the displayable list, preserving order.
///
/// A missing or zero `messageID` falls back to the 1-based position.
pub fn to_chat_messages(remote: &[RemoteMessage]) -> Vec<ChatMessage> {
    remote
        .iter()
        .enumerate()
        .map(|(index, msg)| ChatMessage {
            id: msg
                .message_id
                .filter(|id| *id != 0)
                .unwrap_or(index as i64 + 1),
            text: strip_html(&msg.message_text),
            sender: Sender::from_sender_type(&msg.sender_type),
        })
        .collect()
}

/// Fetch and transform the full history of a session.
pub async fn fetch_history<S: ConversationService>(
    service: &S,
    session_id: ChatSessionId,
) -> Result<Vec<ChatMessage>, ChatError> {
    let remote = service
        .get_messages(session_id)
        .await
        .map_err(|e| ChatError::FetchFailed(e.to_string()))?;
    Ok(to_chat_messages(&remote))
}
