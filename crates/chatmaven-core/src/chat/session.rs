//! Session manager for the widget conversation.
//!
//! Owns the session identifier, the displayed message list and the
//! two-screen view state. All mutation goes through the operations here;
//! the presentation layer only reads snapshots.
//!
//! Ordering within one send: create session -> insert greeting -> insert
//! user message -> fetch history. Session creation is serialized by an async
//! gate, so overlapping sends never create two sessions.

use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use chatmaven_types::chat::{
    ChatMessage, ChatSessionId, OutgoingMessage, SenderType, SessionState, View,
};
use chatmaven_types::config::{InputClearPolicy, WidgetConfig};
use chatmaven_types::error::ChatError;

use super::history::fetch_history;
use crate::remote::ConversationService;

/// UI-facing state that is not sent to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationView {
    pub view: View,
    pub pending_input: String,
}

/// Result of [`SessionManager::send_message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty after trimming; nothing happened.
    Empty,
    /// No session could be created; the message was not posted.
    SessionFailed,
    /// The message was stored in the session.
    Delivered(ChatSessionId),
    /// The session exists but storing the message failed.
    PostFailed(ChatSessionId),
}

/// Settings the manager needs from [`WidgetConfig`].
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub bot_unique_id: String,
    pub greeting_text: String,
    pub input_clear_policy: InputClearPolicy,
}

impl From<&WidgetConfig> for SessionSettings {
    fn from(config: &WidgetConfig) -> Self {
        Self {
            bot_unique_id: config.bot_unique_id.clone(),
            greeting_text: config.greeting_text.clone(),
            input_clear_policy: config.input_clear_policy,
        }
    }
}

/// Manages the lifecycle of the widget's single conversation.
///
/// Generic over `ConversationService` so core never depends on the HTTP
/// implementation. Methods take `&self`; share it behind an `Arc`.
pub struct SessionManager<S: ConversationService> {
    service: S,
    settings: SessionSettings,
    state: RwLock<SessionState>,
    /// Held for the whole create-session + greeting sequence.
    creation_gate: Mutex<()>,
    messages: RwLock<Vec<ChatMessage>>,
    view: RwLock<ConversationView>,
    /// Bumped by `start_new_chat`; results from an older conversation are
    /// not applied.
    epoch: AtomicU64,
}

impl<S: ConversationService> SessionManager<S> {
    /// Create a manager with no session, an empty list and the landing view.
    pub fn new(service: S, settings: SessionSettings) -> Self {
        Self {
            service,
            settings,
            state: RwLock::new(SessionState::NoSession),
            creation_gate: Mutex::new(()),
            messages: RwLock::new(Vec::new()),
            view: RwLock::new(ConversationView::default()),
            epoch: AtomicU64::new(0),
        }
    }

    /// Continue an existing server session instead of creating one.
    pub fn with_session(self, session_id: ChatSessionId) -> Self {
        *self.state.write().expect("session state lock poisoned") =
            SessionState::Active(session_id);
        self
    }

    /// Access the underlying conversation service.
    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    // --- Read-only snapshots ---

    pub fn session_state(&self) -> SessionState {
        *self.state.read().expect("session state lock poisoned")
    }

    pub fn session_id(&self) -> Option<ChatSessionId> {
        self.session_state().session_id()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.read().expect("message list lock poisoned").clone()
    }

    pub fn view(&self) -> View {
        self.view.read().expect("view lock poisoned").view
    }

    pub fn input(&self) -> String {
        self.view
            .read()
            .expect("view lock poisoned")
            .pending_input
            .clone()
    }

    pub fn conversation_view(&self) -> ConversationView {
        self.view.read().expect("view lock poisoned").clone()
    }

    // --- View operations ---

    pub fn open_chat(&self) {
        self.view.write().expect("view lock poisoned").view = View::Chat;
    }

    pub fn go_back(&self) {
        self.view.write().expect("view lock poisoned").view = View::Landing;
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.view.write().expect("view lock poisoned").pending_input = text.into();
    }

    // --- Session lifecycle ---

    /// Return the current session id, creating a session first if needed.
    ///
    /// A new session gets the configured greeting inserted as its first
    /// message before this returns.
    pub async fn ensure_session(&self, first_message_text: &str) -> Result<ChatSessionId, ChatError> {
        let greeting = self.settings.greeting_text.clone();
        self.ensure_session_with_greeting(first_message_text, &greeting)
            .await
    }

    /// Like [`ensure_session`](Self::ensure_session) with an explicit greeting.
    pub async fn ensure_session_with_greeting(
        &self,
        first_message_text: &str,
        greeting: &str,
    ) -> Result<ChatSessionId, ChatError> {
        if let Some(id) = self.session_id() {
            return Ok(id);
        }

        let _gate = self.creation_gate.lock().await;

        // A caller queued behind an in-flight creation reuses its result.
        if let Some(id) = self.session_id() {
            debug!(session_id = %id, "Reusing session created while waiting");
            return Ok(id);
        }

        self.set_state(SessionState::Pending);

        let session_id = match self
            .service
            .create_session(&self.settings.bot_unique_id, first_message_text)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                self.set_state(SessionState::NoSession);
                warn!(error = %e, "Chat session creation failed");
                return Err(ChatError::SessionCreationFailed(e.to_string()));
            }
        };

        info!(session_id = %session_id, "Chat session created");

        // Stays Pending until the greeting is stored, so no user message
        // can be posted ahead of it.
        let greeting = OutgoingMessage::new(
            &self.settings.bot_unique_id,
            session_id,
            SenderType::Bot,
            greeting,
        );
        if let Err(e) = self.service.insert_message(&greeting).await {
            warn!(session_id = %session_id, error = %e, "Failed to insert greeting message");
        }

        self.set_state(SessionState::Active(session_id));
        Ok(session_id)
    }

    /// Store one end-user message in `session_id`. Not retried.
    pub async fn post_user_message(
        &self,
        session_id: ChatSessionId,
        text: &str,
    ) -> Result<(), ChatError> {
        let message = OutgoingMessage::new(
            &self.settings.bot_unique_id,
            session_id,
            SenderType::EndUser,
            text,
        );
        self.service.insert_message(&message).await.map_err(|e| {
            warn!(session_id = %session_id, error = %e, "Failed to post user message");
            ChatError::MessageInsertFailed(e.to_string())
        })
    }

    /// Re-fetch the whole history and replace the local list.
    ///
    /// Falls back to the established session when `session_id` is `None`;
    /// with neither, no remote call is made. A failed fetch leaves the list
    /// untouched. Returns the list as it stands afterwards.
    pub async fn refresh_messages(&self, session_id: Option<ChatSessionId>) -> Vec<ChatMessage> {
        let Some(session_id) = session_id.or_else(|| self.session_id()) else {
            return self.messages();
        };

        let epoch = self.epoch.load(Ordering::SeqCst);
        self.refresh_in_epoch(session_id, epoch).await
    }

    /// Fetch and apply history unless a new chat started after `epoch`.
    async fn refresh_in_epoch(&self, session_id: ChatSessionId, epoch: u64) -> Vec<ChatMessage> {
        match fetch_history(&self.service, session_id).await {
            Ok(fetched) => {
                let mut messages = self.messages.write().expect("message list lock poisoned");
                if self.epoch.load(Ordering::SeqCst) == epoch {
                    debug!(session_id = %session_id, count = fetched.len(), "Message list refreshed");
                    *messages = fetched;
                } else {
                    debug!(session_id = %session_id, "Discarding history fetched for a previous chat");
                }
            }
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Keeping previous message list");
            }
        }

        self.messages()
    }

    /// Send the pending input text.
    ///
    /// Creates the session on first use, posts the message, applies the
    /// input clearing policy and refreshes the list. The refresh runs after
    /// the post attempt whether or not the post succeeded.
    pub async fn send_message(&self) -> SendOutcome {
        let input = self.input();
        let text = input.trim();
        if text.is_empty() {
            return SendOutcome::Empty;
        }

        let epoch = self.epoch.load(Ordering::SeqCst);

        let session_id = match self.ensure_session(text).await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Message dropped: no chat session");
                return SendOutcome::SessionFailed;
            }
        };

        let posted = self.post_user_message(session_id, text).await.is_ok();
        self.apply_input_policy(posted, epoch);
        self.refresh_in_epoch(session_id, epoch).await;

        if posted {
            SendOutcome::Delivered(session_id)
        } else {
            SendOutcome::PostFailed(session_id)
        }
    }

    /// Set the input text and send it.
    pub async fn send_text(&self, text: impl Into<String>) -> SendOutcome {
        self.set_input(text);
        self.send_message().await
    }

    /// Forget the current conversation locally.
    ///
    /// Switches to the chat view and clears messages, input and session id
    /// together. The server is not notified. Waits for an in-flight session
    /// creation so it cannot re-populate the reset state.
    pub async fn start_new_chat(&self) {
        let _gate = self.creation_gate.lock().await;

        self.epoch.fetch_add(1, Ordering::SeqCst);
        let previous = self.session_state();
        self.set_state(SessionState::NoSession);
        self.messages
            .write()
            .expect("message list lock poisoned")
            .clear();
        {
            let mut view = self.view.write().expect("view lock poisoned");
            view.view = View::Chat;
            view.pending_input.clear();
        }

        info!(previous = %previous, "Started new chat");
    }

    fn set_state(&self, state: SessionState) {
        *self.state.write().expect("session state lock poisoned") = state;
    }

    fn apply_input_policy(&self, posted: bool, epoch: u64) {
        if self.epoch.load(Ordering::SeqCst) != epoch {
            return;
        }
        let clear = match self.settings.input_clear_policy {
            InputClearPolicy::AfterAttempt => true,
            InputClearPolicy::OnSuccess => posted,
        };
        if clear {
            self.view
                .write()
                .expect("view lock poisoned")
                .pending_input
                .clear();
        }
    }
}
