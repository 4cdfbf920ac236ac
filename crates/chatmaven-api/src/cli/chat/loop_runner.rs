//! Main chat loop orchestration.
//!
//! Loads the appearance, shows the landing screen and drives the session
//! manager from user input: plain lines are sent as messages, slash
//! commands stand in for the widget's buttons.

use std::io::Write;

use console::style;
use rustyline_async::SharedWriter;
use tracing::debug;

use chatmaven_core::chat::session::SendOutcome;
use chatmaven_core::contact::submit_contact_form;
use chatmaven_types::appearance::ChatAppearance;
use chatmaven_types::chat::View;
use chatmaven_types::contact::ContactForm;

use crate::cli::appearance::load_appearance;
use crate::cli::contact::outcome_lines;
use crate::cli::spinner;
use crate::state::AppState;

use super::banner::{chat_header_lines, landing_lines};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::{ChatRenderer, Transcript};

/// Everything the loop needs between iterations.
struct ChatScreen<'a> {
    state: &'a AppState,
    appearance: ChatAppearance,
    renderer: ChatRenderer,
    transcript: Transcript,
    out: SharedWriter,
}

impl ChatScreen<'_> {
    fn print_lines(&mut self, lines: &[String]) {
        for line in lines {
            let _ = writeln!(self.out, "{line}");
        }
    }

    fn print_note(&mut self, marker: console::StyledObject<&str>, text: &str) {
        let _ = writeln!(self.out, "\n  {marker} {text}\n");
    }

    fn show_landing(&mut self) {
        let lines = landing_lines(&self.appearance, &self.renderer);
        self.print_lines(&lines);
    }

    fn show_chat(&mut self) {
        let lines = chat_header_lines(
            &self.appearance,
            &self.renderer,
            self.state.session.session_state(),
        );
        self.print_lines(&lines);
        self.transcript.reset();
        self.print_fresh_messages();
    }

    /// Print messages that are not on screen yet.
    fn print_fresh_messages(&mut self) {
        let messages = self.state.session.messages();
        let lines: Vec<String> = self
            .transcript
            .fresh(&messages)
            .into_iter()
            .map(|m| self.renderer.format_message(m))
            .collect();
        self.print_lines(&lines);
    }

    async fn send(&mut self, text: Option<String>) {
        let state = self.state;
        let session = &state.session;
        if session.view() == View::Landing {
            session.open_chat();
            self.show_chat();
        }

        let progress = spinner("sending...");
        let outcome = match text {
            Some(text) => session.send_text(text).await,
            None => session.send_message().await,
        };
        progress.finish_and_clear();
        debug!(?outcome, "Send finished");

        match outcome {
            SendOutcome::Empty => {}
            SendOutcome::Delivered(_) => self.print_fresh_messages(),
            SendOutcome::PostFailed(_) => {
                self.print_fresh_messages();
                let hint = if session.input().is_empty() {
                    "Your message could not be delivered."
                } else {
                    "Your message could not be delivered. Press Enter to resend."
                };
                self.print_note(style("!").yellow().bold(), hint);
            }
            SendOutcome::SessionFailed => {
                self.print_note(
                    style("!").red().bold(),
                    "Could not start a chat session. Please try again.",
                );
            }
        }
    }

    async fn contact(&mut self, input: &mut ChatInput) {
        let _ = writeln!(
            self.out,
            "\n  {} {}",
            style("Contact us").bold(),
            style("(Ctrl+C to cancel)").dim()
        );

        let Some(form) = ask_contact_form(input).await else {
            self.print_note(style("i").blue().bold(), "Contact form cancelled.");
            return;
        };

        let progress = spinner("Sending message...");
        let result =
            submit_contact_form(&*self.state.session, &self.state.config.contact, &form).await;
        progress.finish_and_clear();

        let mut lines = vec![String::new()];
        lines.extend(
            outcome_lines(&result, &self.state.config.contact.body_text)
                .into_iter()
                .map(|l| format!("  {l}")),
        );
        lines.push(String::new());
        self.print_lines(&lines);
    }
}

/// Prompt for the four contact fields. `None` when the user cancels.
async fn ask_contact_form(input: &mut ChatInput) -> Option<ContactForm> {
    let mut values = Vec::with_capacity(4);
    for prompt in ["Name", "Email", "Phone Number", "Message"] {
        match input.ask(&format!("  {prompt}: ")).await {
            InputEvent::Message(value) => values.push(value),
            InputEvent::Eof | InputEvent::Interrupted => return None,
        }
    }
    let mut values = values.into_iter();
    Some(ContactForm {
        name: values.next().unwrap_or_default(),
        email: values.next().unwrap_or_default(),
        phone: values.next().unwrap_or_default(),
        message: values.next().unwrap_or_default(),
    })
}

/// Run the interactive chat widget.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let appearance = load_appearance(state, true).await;
    let renderer = ChatRenderer::new(&appearance);

    if let Some(id) = state.session.session_id() {
        let progress = spinner("Loading conversation...");
        state.session.refresh_messages(Some(id)).await;
        progress.finish_and_clear();
    }

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, out) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    let mut screen = ChatScreen {
        state,
        appearance,
        renderer,
        transcript: Transcript::default(),
        out,
    };

    if state.session.session_id().is_some() {
        state.session.open_chat();
        screen.show_chat();
    } else {
        screen.show_landing();
    }

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                let _ = writeln!(screen.out, "\n  {}", style("Chat closed.").dim());
                break;
            }
            InputEvent::Interrupted => {
                let _ = writeln!(
                    screen.out,
                    "\n  {}",
                    style("Press Ctrl+D to exit, or keep chatting.").dim()
                );
            }
            InputEvent::Message(text) if text.is_empty() => {
                // Enter on an empty line resends retained input.
                if !state.session.input().is_empty() {
                    screen.send(None).await;
                }
            }
            InputEvent::Message(text) => {
                let Some(cmd) = commands::parse(&text) else {
                    screen.send(Some(text)).await;
                    continue;
                };

                match cmd {
                    ChatCommand::Help => screen.print_lines(&commands::help_lines()),
                    ChatCommand::Open => {
                        state.session.open_chat();
                        screen.show_chat();
                    }
                    ChatCommand::Back => {
                        state.session.go_back();
                        screen.show_landing();
                    }
                    ChatCommand::New => {
                        state.session.start_new_chat().await;
                        screen.show_chat();
                    }
                    ChatCommand::Contact => screen.contact(&mut chat_input).await,
                    ChatCommand::History => {
                        let progress = spinner("Loading conversation...");
                        state.session.refresh_messages(None).await;
                        progress.finish_and_clear();
                        state.session.open_chat();
                        screen.show_chat();
                    }
                    ChatCommand::Clear => chat_input.clear(),
                    ChatCommand::Exit => {
                        let _ = writeln!(screen.out, "\n  {}", style("Chat closed.").dim());
                        break;
                    }
                    ChatCommand::Unknown(name) => {
                        let text = format!(
                            "Unknown command: {}. Type /help for available commands.",
                            style(name).dim()
                        );
                        screen.print_note(style("?").yellow().bold(), &text);
                    }
                }
            }
        }
    }

    chat_input.flush();
    Ok(())
}
