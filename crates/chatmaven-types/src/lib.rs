//! Shared domain types for the ChatMaven widget client.
//!
//! Sessions, messages, appearance, the contact form, configuration and
//! their error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod appearance;
pub mod chat;
pub mod config;
pub mod contact;
pub mod error;

mod wire;
