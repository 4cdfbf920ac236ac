//! Application state wiring the widget services together.
//!
//! AppState holds the loaded configuration and the session manager pinned to
//! the HTTP conversation service.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::debug;

use chatmaven_core::chat::session::{SessionManager, SessionSettings};
use chatmaven_infra::config::{load_widget_config, resolve_api_key, resolve_data_dir};
use chatmaven_infra::http::HttpConversationService;
use chatmaven_types::chat::ChatSessionId;
use chatmaven_types::config::WidgetConfig;

/// Session manager pinned to the HTTP implementation.
pub type ConcreteSessionManager = SessionManager<HttpConversationService>;

/// Command-line values that take precedence over `config.toml`.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub bot_unique_id: Option<String>,
    pub resume_session_id: Option<ChatSessionId>,
}

impl ConfigOverrides {
    fn apply(self, config: &mut WidgetConfig) {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(bot) = self.bot_unique_id {
            config.bot_unique_id = bot;
        }
        if let Some(id) = self.resume_session_id {
            config.resume_session_id = Some(id);
        }
    }
}

/// Shared application state used by every subcommand.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<WidgetConfig>,
    pub session: Arc<ConcreteSessionManager>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load configuration, apply overrides and wire the session manager.
    pub async fn init(overrides: ConfigOverrides) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let mut config = load_widget_config(&data_dir).await;
        overrides.apply(&mut config);

        let api_key = resolve_api_key(&config);
        let service = HttpConversationService::from_config(&config, api_key)
            .context("Failed to set up the conversation service client")?;

        let mut manager = SessionManager::new(service, SessionSettings::from(&config));
        if let Some(id) = config.resume_session_id {
            debug!(session_id = %id, "Resuming chat session");
            manager = manager.with_session(id);
        }

        Ok(Self {
            config: Arc::new(config),
            session: Arc::new(manager),
            data_dir,
        })
    }
}
