//! Recording in-memory `ConversationService` for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chatmaven_types::appearance::ChatAppearance;
use chatmaven_types::chat::{ChatSessionId, OutgoingMessage, RemoteMessage};
use chatmaven_types::contact::ContactSubmission;
use chatmaven_types::error::ServiceError;

use super::ConversationService;

/// One recorded remote call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetAppearance,
    CreateSession { bot: String, text: String },
    InsertMessage(OutgoingMessage),
    GetMessages(ChatSessionId),
    SubmitContactForm(ContactSubmission),
}

#[derive(Default)]
struct Inner {
    calls: Vec<Call>,
    /// Ids handed out by successive `create_session` calls; `None` = failure.
    session_ids: VecDeque<Option<i64>>,
    next_session_id: i64,
    fail_greeting: bool,
    fail_user_insert: bool,
    fail_get: bool,
    fail_contact: bool,
    history: Vec<RemoteMessage>,
    store_inserts: bool,
    create_delay_ms: u64,
    insert_delay_ms: u64,
    get_delay_ms: u64,
}

/// Cloneable handle; clones share recorded calls.
#[derive(Clone, Default)]
pub struct MockService {
    inner: Arc<Mutex<Inner>>,
}

impl MockService {
    pub fn new() -> Self {
        let mock = Self::default();
        mock.inner.lock().unwrap().next_session_id = 449;
        mock
    }

    /// Stored inserts are echoed back by `get_messages`.
    pub fn storing() -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().store_inserts = true;
        mock
    }

    pub fn push_session_result(&self, id: Option<i64>) {
        self.inner.lock().unwrap().session_ids.push_back(id);
    }

    pub fn fail_greeting(&self) {
        self.inner.lock().unwrap().fail_greeting = true;
    }

    pub fn fail_user_insert(&self, fail: bool) {
        self.inner.lock().unwrap().fail_user_insert = fail;
    }

    pub fn fail_get(&self, fail: bool) {
        self.inner.lock().unwrap().fail_get = fail;
    }

    pub fn fail_contact(&self) {
        self.inner.lock().unwrap().fail_contact = true;
    }

    pub fn set_create_delay_ms(&self, ms: u64) {
        self.inner.lock().unwrap().create_delay_ms = ms;
    }

    pub fn set_insert_delay_ms(&self, ms: u64) {
        self.inner.lock().unwrap().insert_delay_ms = ms;
    }

    pub fn set_get_delay_ms(&self, ms: u64) {
        self.inner.lock().unwrap().get_delay_ms = ms;
    }

    pub fn set_history(&self, history: Vec<RemoteMessage>) {
        self.inner.lock().unwrap().history = history;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    pub fn create_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::CreateSession { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        self.inner.lock().unwrap().calls.push(call);
    }
}

pub fn remote(id: Option<i64>, text: &str, sender_type: &str) -> RemoteMessage {
    RemoteMessage {
        message_id: id,
        message_text: text.to_string(),
        sender_type: sender_type.to_string(),
        ..Default::default()
    }
}

impl ConversationService for MockService {
    async fn get_appearance(&self) -> Result<ChatAppearance, ServiceError> {
        self.record(Call::GetAppearance);
        Ok(ChatAppearance {
            agent_title: "Maven".to_string(),
            ..Default::default()
        })
    }

    async fn create_session(
        &self,
        bot_unique_id: &str,
        message_text: &str,
    ) -> Result<ChatSessionId, ServiceError> {
        self.record(Call::CreateSession {
            bot: bot_unique_id.to_string(),
            text: message_text.to_string(),
        });
        let delay = self.inner.lock().unwrap().create_delay_ms;
        if delay > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }
        let mut inner = self.inner.lock().unwrap();
        let next = match inner.session_ids.pop_front() {
            Some(queued) => queued,
            None => {
                let id = inner.next_session_id;
                inner.next_session_id += 1;
                Some(id)
            }
        };
        next.map(ChatSessionId)
            .ok_or_else(|| ServiceError::Unsuccessful("could not create session".to_string()))
    }

    async fn insert_message(&self, message: &OutgoingMessage) -> Result<(), ServiceError> {
        self.record(Call::InsertMessage(message.clone()));
        let delay = self.inner.lock().unwrap().insert_delay_ms;
        if delay > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }
        let mut inner = self.inner.lock().unwrap();
        let fail = match message.sender_type {
            chatmaven_types::chat::SenderType::Bot => inner.fail_greeting,
            chatmaven_types::chat::SenderType::EndUser => inner.fail_user_insert,
        };
        if fail {
            return Err(ServiceError::Status {
                status: 500,
                body: "insert failed".to_string(),
            });
        }
        if inner.store_inserts {
            let next_id = inner.history.len() as i64 + 1;
            inner.history.push(remote(
                Some(next_id),
                &message.text,
                message.sender_type.as_str(),
            ));
        }
        Ok(())
    }

    async fn get_messages(
        &self,
        session_id: ChatSessionId,
    ) -> Result<Vec<RemoteMessage>, ServiceError> {
        self.record(Call::GetMessages(session_id));
        let delay = self.inner.lock().unwrap().get_delay_ms;
        if delay > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }
        let inner = self.inner.lock().unwrap();
        if inner.fail_get {
            return Err(ServiceError::Transport("connection reset".to_string()));
        }
        Ok(inner.history.clone())
    }

    async fn submit_contact_form(
        &self,
        submission: &ContactSubmission,
    ) -> Result<(), ServiceError> {
        self.record(Call::SubmitContactForm(submission.clone()));
        if self.inner.lock().unwrap().fail_contact {
            return Err(ServiceError::Unsuccessful("rejected".to_string()));
        }
        Ok(())
    }
}
