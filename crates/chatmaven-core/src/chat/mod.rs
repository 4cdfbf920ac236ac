//! Chat session management for the widget.
//!
//! `SessionManager` owns the conversation state and sequences the remote
//! calls; `history` turns server messages into the displayed list.

pub mod history;
pub mod session;
