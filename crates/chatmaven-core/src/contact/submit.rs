//! Contact form submission.
//!
//! Unlike the chat flow, failures here are reported back to the user.

use tracing::{info, warn};

use chatmaven_types::chat::ChatSessionId;
use chatmaven_types::config::ContactConfig;
use chatmaven_types::contact::{ContactForm, ContactSubmission};
use chatmaven_types::error::ChatError;

use super::validate::validate;
use crate::chat::session::SessionManager;
use crate::remote::ConversationService;

/// Validate and submit the contact form.
///
/// Opens a session through `manager` when none exists yet (inserting the
/// contact greeting), so the submission is always tied to a session.
/// Returns the session id the form was filed under.
pub async fn submit_contact_form<S: ConversationService>(
    manager: &SessionManager<S>,
    config: &ContactConfig,
    form: &ContactForm,
) -> Result<ChatSessionId, ChatError> {
    validate(form).map_err(ChatError::Validation)?;

    let session_id = manager
        .ensure_session_with_greeting("", &config.greeting_text)
        .await
        .map_err(|e| ChatError::FormSubmissionFailed(format!("failed to create chat session: {e}")))?;

    let submission = ContactSubmission {
        message_sent_body_text: config.body_text.clone(),
        message_sent_header_text: config.header_text.clone(),
        name: form.name.trim().to_string(),
        email: form.email.clone(),
        phone: form.phone.clone(),
        message: form.message.trim().to_string(),
        bot_id: manager.settings().bot_unique_id.clone(),
        chat_session_id: session_id.to_string(),
    };

    manager
        .service()
        .submit_contact_form(&submission)
        .await
        .map_err(|e| {
            warn!(session_id = %session_id, error = %e, "Contact form submission failed");
            ChatError::FormSubmissionFailed(e.to_string())
        })?;

    info!(session_id = %session_id, "Contact form submitted");
    Ok(session_id)
}
