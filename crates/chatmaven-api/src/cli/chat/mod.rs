//! Interactive terminal rendition of the chat widget.
//!
//! Two screens like the embedded widget: a landing screen built from the
//! bot's appearance, and the conversation screen. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
