//! ConversationService trait definition.
//!
//! One method per remote endpoint. Follows the RPITIT pattern used by the
//! other port traits: native async fn in traits, `Send` futures.

use chatmaven_types::appearance::ChatAppearance;
use chatmaven_types::chat::{ChatSessionId, OutgoingMessage, RemoteMessage};
use chatmaven_types::contact::ContactSubmission;
use chatmaven_types::error::ServiceError;

/// Remote service that persists sessions and messages.
///
/// Implementations must map `success: false` responses to
/// [`ServiceError::Unsuccessful`] so callers only see `Ok` for stored data.
pub trait ConversationService: Send + Sync {
    /// Fetch the widget appearance for the configured bot.
    fn get_appearance(
        &self,
    ) -> impl std::future::Future<Output = Result<ChatAppearance, ServiceError>> + Send;

    /// Create a new chat session.
    ///
    /// `message_text` is informational context for the service; it is not
    /// stored as a message.
    fn create_session(
        &self,
        bot_unique_id: &str,
        message_text: &str,
    ) -> impl std::future::Future<Output = Result<ChatSessionId, ServiceError>> + Send;

    /// Store one message in a session.
    fn insert_message(
        &self,
        message: &OutgoingMessage,
    ) -> impl std::future::Future<Output = Result<(), ServiceError>> + Send;

    /// Fetch the full, ordered history of a session.
    fn get_messages(
        &self,
        session_id: ChatSessionId,
    ) -> impl std::future::Future<Output = Result<Vec<RemoteMessage>, ServiceError>> + Send;

    /// Submit the contact form.
    fn submit_contact_form(
        &self,
        submission: &ContactSubmission,
    ) -> impl std::future::Future<Output = Result<(), ServiceError>> + Send;
}
