//! Infrastructure layer for the ChatMaven widget client.
//!
//! Contains the HTTP implementation of the `ConversationService` trait defined
//! in `chatmaven-core` and the `config.toml` loader.

pub mod config;
pub mod http;
