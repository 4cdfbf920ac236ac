//! Business logic and service port definitions for the ChatMaven widget client.
//!
//! This crate defines the `ConversationService` port that the infrastructure
//! layer implements. It depends only on `chatmaven-types` -- never on
//! `chatmaven-infra` or any HTTP crate.

pub mod chat;
pub mod contact;
pub mod remote;
