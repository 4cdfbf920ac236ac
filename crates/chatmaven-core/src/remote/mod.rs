//! Port to the remote conversation service.
//!
//! `ConversationService` is implemented in chatmaven-infra over HTTP; core
//! logic only ever talks to the trait.

pub mod conversation;

#[cfg(test)]
pub(crate) mod mock;

pub use conversation::ConversationService;
