//! Widget configuration loader for ChatMaven.
//!
//! Reads `config.toml` from the data directory (`~/.chatmaven/` in production)
//! and deserializes it into [`WidgetConfig`]. Falls back to the hosted
//! service defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use chatmaven_types::config::WidgetConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CHATMAVEN_DATA_DIR";

/// Environment variable carrying the API key.
pub const API_KEY_ENV: &str = "CHATMAVEN_API_KEY";

/// Minimum request timeout in seconds.
const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `CHATMAVEN_DATA_DIR` environment variable
/// 2. `~/.chatmaven`
/// 3. `./.chatmaven`
pub fn resolve_data_dir() -> PathBuf {
    data_dir_from(std::env::var(DATA_DIR_ENV).ok(), dirs::home_dir())
}

fn data_dir_from(env_dir: Option<String>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = env_dir.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    if let Some(home) = home {
        return home.join(".chatmaven");
    }
    PathBuf::from(".chatmaven")
}

/// Load widget configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`WidgetConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file parses, returns it with the request timeout floored at one second.
pub async fn load_widget_config(data_dir: &Path) -> WidgetConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return WidgetConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return WidgetConfig::default();
        }
    };

    match toml::from_str::<WidgetConfig>(&content) {
        Ok(mut config) => {
            config.request_timeout_secs = config.request_timeout_secs.max(MIN_REQUEST_TIMEOUT_SECS);
            config
        }
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            WidgetConfig::default()
        }
    }
}

/// Resolve the key sent in the API key header.
///
/// Priority:
/// 1. `CHATMAVEN_API_KEY` environment variable
/// 2. `api_key` from `config.toml`
/// 3. The bot unique id
pub fn resolve_api_key(config: &WidgetConfig) -> SecretString {
    api_key_from(std::env::var(API_KEY_ENV).ok(), config)
}

fn api_key_from(env_key: Option<String>, config: &WidgetConfig) -> SecretString {
    let key = env_key
        .filter(|k| !k.trim().is_empty())
        .or_else(|| config.api_key.clone().filter(|k| !k.trim().is_empty()))
        .unwrap_or_else(|| config.bot_unique_id.clone());
    SecretString::from(key)
}
