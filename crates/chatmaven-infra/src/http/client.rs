//! HttpConversationService -- concrete [`ConversationService`] over the
//! ChatMaven REST API.
//!
//! Every request carries the bot key header. The key is wrapped in
//! [`secrecy::SecretString`] and is never logged or included in `Debug`
//! output.

use std::time::Duration;

use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;

use chatmaven_core::remote::ConversationService;
use chatmaven_types::appearance::ChatAppearance;
use chatmaven_types::chat::{ChatSessionId, OutgoingMessage, RemoteMessage};
use chatmaven_types::config::WidgetConfig;
use chatmaven_types::contact::ContactSubmission;
use chatmaven_types::error::ServiceError;

use super::types::{ApiEnvelope, AppearanceData, CreateSessionRequest, InsertMessageRequest};

/// HTTP client for the ChatMaven conversation service.
pub struct HttpConversationService {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    bot_unique_id: String,
}

impl HttpConversationService {
    /// Header carrying the bot key on every request.
    pub const API_KEY_HEADER: &'static str = "X-API-KEY-CC-BI";

    /// Minimum request timeout.
    const MIN_TIMEOUT: Duration = Duration::from_secs(1);

    /// Create a client for `bot_unique_id` against `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        bot_unique_id: impl Into<String>,
        api_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout.max(Self::MIN_TIMEOUT))
            .build()
            .map_err(|e| ServiceError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bot_unique_id: bot_unique_id.into(),
        })
    }

    /// Create a client from the widget configuration.
    pub fn from_config(config: &WidgetConfig, api_key: SecretString) -> Result<Self, ServiceError> {
        Self::new(
            config.base_url.clone(),
            config.bot_unique_id.clone(),
            api_key,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach headers, send, and decode the response envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiEnvelope<T>, ServiceError> {
        let response = request
            .header(Self::API_KEY_HEADER, self.api_key.expose_secret())
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<ApiEnvelope<T>>()
            .await
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }

    /// Send and require `success: true`, returning the (possibly absent) data.
    async fn send_checked<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>, ServiceError> {
        let envelope = self.send::<T>(request).await?;
        if !envelope.success {
            return Err(ServiceError::Unsuccessful(envelope.failure_reason()));
        }
        Ok(envelope.data)
    }
}

// HttpConversationService does NOT derive Debug; the api key must never be printed.

impl ConversationService for HttpConversationService {
    async fn get_appearance(&self) -> Result<ChatAppearance, ServiceError> {
        let url = self.url(&format!(
            "/Appearance/GetAppearanceByUniqueId/{}",
            self.bot_unique_id
        ));
        let data: Option<AppearanceData> = self.send_checked(self.client.get(&url)).await?;
        data.and_then(|d| d.chat_appearance)
            .ok_or(ServiceError::MissingData)
    }

    async fn create_session(
        &self,
        bot_unique_id: &str,
        message_text: &str,
    ) -> Result<ChatSessionId, ServiceError> {
        let body = CreateSessionRequest {
            bot_unique_id,
            end_user_id: None,
            message_text,
        };
        let request = self
            .client
            .post(self.url("/Chats/InsertChatSession"))
            .json(&body);

        let id: Option<i64> = self.send_checked(request).await?;
        match id {
            Some(id) if id != 0 => {
                debug!(session_id = id, "Service created chat session");
                Ok(ChatSessionId(id))
            }
            _ => Err(ServiceError::MissingData),
        }
    }

    async fn insert_message(&self, message: &OutgoingMessage) -> Result<(), ServiceError> {
        let request = self
            .client
            .post(self.url("/Chats/InsertMessage"))
            .json(&InsertMessageRequest::from(message));

        self.send_checked::<serde_json::Value>(request).await?;
        debug!(
            session_id = %message.session_id,
            sender_type = %message.sender_type,
            "Message inserted"
        );
        Ok(())
    }

    async fn get_messages(
        &self,
        session_id: ChatSessionId,
    ) -> Result<Vec<RemoteMessage>, ServiceError> {
        let request = self
            .client
            .get(self.url("/Chats/GetChatMessages"))
            .query(&[("chatSessionID", session_id.0)]);

        self.send_checked::<Vec<RemoteMessage>>(request)
            .await?
            .ok_or(ServiceError::MissingData)
    }

    async fn submit_contact_form(
        &self,
        submission: &ContactSubmission,
    ) -> Result<(), ServiceError> {
        let request = self
            .client
            .post(self.url("/chats/submitcontactform"))
            .json(submission);

        self.send_checked::<serde_json::Value>(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatmaven_core::chat::session::{SendOutcome, SessionManager, SessionSettings};
    use chatmaven_types::chat::{Sender, SenderType};
    use chatmaven_types::config::InputClearPolicy;
    use serde_json::{json, Value};
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BOT: &str = "iy45ytVZo40Ii1dzT78EJDpv3";

    fn service(server: &MockServer) -> HttpConversationService {
        HttpConversationService::new(
            server.uri(),
            BOT,
            SecretString::from("test-key"),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let svc = HttpConversationService::new(
            "http://localhost:8080/",
            BOT,
            SecretString::from("k"),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(svc.base_url(), "http://localhost:8080");
        assert_eq!(
            svc.url("/Chats/InsertMessage"),
            "http://localhost:8080/Chats/InsertMessage"
        );
    }

    #[tokio::test]
    async fn test_get_appearance() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/Appearance/GetAppearanceByUniqueId/{BOT}")))
            .and(header("X-API-KEY-CC-BI", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": { "chatAppearance": {
                    "agentTitle": "Maven",
                    "chatBubbleButtonText": "Chat now"
                }}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let appearance = service(&server).get_appearance().await.unwrap();
        assert_eq!(appearance.agent_title, "Maven");
        assert_eq!(appearance.chat_bubble_button_text, "Chat now");
    }

    #[tokio::test]
    async fn test_get_appearance_missing_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": {} })),
            )
            .mount(&server)
            .await;

        let err = service(&server).get_appearance().await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingData));
    }

    #[tokio::test]
    async fn test_create_session_sends_expected_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Chats/InsertChatSession"))
            .and(header("X-API-KEY-CC-BI", "test-key"))
            .and(body_json(json!({
                "botUniqueID": BOT,
                "endUserID": null,
                "messageText": "hi"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true, "data": 449, "message": "created"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let id = service(&server).create_session(BOT, "hi").await.unwrap();
        assert_eq!(id, ChatSessionId(449));
    }

    #[tokio::test]
    async fn test_create_session_unsuccessful() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Chats/InsertChatSession"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false, "data": 0, "message": "bot disabled"
            })))
            .mount(&server)
            .await;

        let err = service(&server).create_session(BOT, "hi").await.unwrap_err();
        match err {
            ServiceError::Unsuccessful(reason) => assert_eq!(reason, "bot disabled"),
            other => panic!("expected Unsuccessful, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_session_zero_id_is_missing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": 0 })),
            )
            .mount(&server)
            .await;

        let err = service(&server).create_session(BOT, "hi").await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingData));
    }

    #[tokio::test]
    async fn test_insert_message_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Chats/InsertMessage"))
            .and(body_json(json!({
                "chatSessionID": 449,
                "senderType": "EndUser",
                "senderID": 0,
                "messageText": "hello",
                "SenderUID": format!("{BOT}_cs_449_enduser")
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": null })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let msg = OutgoingMessage::new(BOT, ChatSessionId(449), SenderType::EndUser, "hello");
        service(&server).insert_message(&msg).await.unwrap();
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("server exploded"))
            .mount(&server)
            .await;

        let msg = OutgoingMessage::new(BOT, ChatSessionId(1), SenderType::EndUser, "x");
        let err = service(&server).insert_message(&msg).await.unwrap_err();
        match err {
            ServiceError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "server exploded");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = service(&server)
            .get_messages(ChatSessionId(449))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
    }

    #[tokio::test]
    async fn test_get_messages_query_and_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Chats/GetChatMessages"))
            .and(query_param("chatSessionID", "449"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "",
                "data": [
                    { "messageID": 2, "messageText": "<b>Hi</b> there", "senderType": "Bot" },
                    { "messageID": 1, "messageText": "yo", "senderType": "EndUser" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let messages = service(&server)
            .get_messages(ChatSessionId(449))
            .await
            .unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].message_id, Some(2));
        assert_eq!(messages[1].sender_type, "EndUser");
    }

    #[tokio::test]
    async fn test_null_strings_in_payloads_decode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Chats/GetChatMessages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [
                    { "messageID": 1, "messageText": "hello", "senderType": null },
                    { "messageID": 2, "messageText": null, "senderType": "Bot" }
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/Appearance/GetAppearanceByUniqueId/{BOT}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": { "chatAppearance": { "agentTitle": "Maven", "avatar": null } }
            })))
            .mount(&server)
            .await;

        let svc = service(&server);
        let messages = svc.get_messages(ChatSessionId(449)).await.unwrap();
        assert_eq!(messages[0].sender_type, "");
        assert_eq!(messages[1].message_text, "");

        let appearance = svc.get_appearance().await.unwrap();
        assert_eq!(appearance.agent_title, "Maven");
        assert!(!appearance.has_avatar());
    }

    #[tokio::test]
    async fn test_submit_contact_form_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chats/submitcontactform"))
            .and(body_json(json!({
                "MessageSentBodyText": "Thanks",
                "MessageSentHeaderText": "Message Sent",
                "Name": "Ada",
                "Email": "ada@example.com",
                "Phone": "123",
                "Message": "Hello",
                "BotId": BOT,
                "ChatSessionID": "449"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(1)
            .mount(&server)
            .await;

        let submission = ContactSubmission {
            message_sent_body_text: "Thanks".to_string(),
            message_sent_header_text: "Message Sent".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "123".to_string(),
            message: "Hello".to_string(),
            bot_id: BOT.to_string(),
            chat_session_id: "449".to_string(),
        };
        service(&server)
            .submit_contact_form(&submission)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_session_manager_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Chats/InsertChatSession"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": 449 })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/Chats/InsertMessage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/Chats/GetChatMessages"))
            .and(query_param("chatSessionID", "449"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [
                    { "messageID": 1, "messageText": "I am a Chatbot!", "senderType": "Bot" },
                    { "messageID": 2, "messageText": "hi", "senderType": "EndUser" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mgr = SessionManager::new(
            service(&server),
            SessionSettings {
                bot_unique_id: BOT.to_string(),
                greeting_text: "I am a Chatbot!".to_string(),
                input_clear_policy: InputClearPolicy::OnSuccess,
            },
        );

        let outcome = mgr.send_text("hi").await;
        assert_eq!(outcome, SendOutcome::Delivered(ChatSessionId(449)));
        assert!(mgr.input().is_empty());

        let messages = mgr.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::Bot);
        assert_eq!(messages[1].text, "hi");

        let requests = server.received_requests().await.unwrap();
        let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
        assert_eq!(
            paths,
            vec![
                "/Chats/InsertChatSession",
                "/Chats/InsertMessage",
                "/Chats/InsertMessage",
                "/Chats/GetChatMessages"
            ]
        );

        let greeting: Value = serde_json::from_slice(&requests[1].body).unwrap();
        let user: Value = serde_json::from_slice(&requests[2].body).unwrap();
        assert_eq!(greeting["senderType"], "Bot");
        assert_eq!(user["senderType"], "EndUser");
        assert_eq!(greeting["SenderUID"], user["SenderUID"]);
    }

    #[tokio::test]
    async fn test_failed_session_over_http_sends_nothing_else() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Chats/InsertChatSession"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": false })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mgr = SessionManager::new(
            service(&server),
            SessionSettings {
                bot_unique_id: BOT.to_string(),
                greeting_text: "I am a Chatbot!".to_string(),
                input_clear_policy: InputClearPolicy::OnSuccess,
            },
        );

        assert_eq!(mgr.send_text("hi").await, SendOutcome::SessionFailed);
        assert_eq!(mgr.session_id(), None);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }
}
