//! `contact` command and contact form result reporting.

use anyhow::Result;
use console::style;
use dialoguer::Input;

use chatmaven_core::contact::submit_contact_form;
use chatmaven_types::chat::ChatSessionId;
use chatmaven_types::contact::ContactForm;
use chatmaven_types::error::ChatError;

use crate::state::AppState;

use super::spinner;

/// Prompt for any field not given as a flag, then validate and submit.
///
/// # Examples
///
/// ```bash
/// # Interactive
/// cmaven contact
///
/// # One-shot with flags
/// cmaven contact --name Ada --email ada@example.com --phone 5551234 --message "Call me"
/// ```
pub async fn submit_contact(
    state: &AppState,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    message: Option<String>,
    json: bool,
) -> Result<()> {
    let form = ContactForm {
        name: prompt_unless_given(name, "Name")?,
        email: prompt_unless_given(email, "Email")?,
        phone: prompt_unless_given(phone, "Phone Number")?,
        message: prompt_unless_given(message, "Message")?,
    };

    let progress = (!json).then(|| spinner("Sending message..."));
    let result = submit_contact_form(&*state.session, &state.config.contact, &form).await;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome_json(&result))?);
        return Ok(());
    }

    println!();
    for line in outcome_lines(&result, &state.config.contact.body_text) {
        println!("  {line}");
    }
    println!();

    Ok(())
}

fn prompt_unless_given(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
    }
}

/// Styled lines describing a submission result.
pub fn outcome_lines(result: &Result<ChatSessionId, ChatError>, body_text: &str) -> Vec<String> {
    match result {
        Ok(_) => vec![
            format!("{} Message Sent Successfully", style("✓").green().bold()),
            format!("{}", style(body_text).dim()),
        ],
        Err(ChatError::Validation(errors)) => errors
            .iter()
            .map(|(field, msg)| {
                format!("{} {}: {}", style("✗").red().bold(), style(field).bold(), msg)
            })
            .collect(),
        Err(e) => vec![
            format!("{} Failed to submit the message", style("✗").red().bold()),
            format!("{}", style(e).dim()),
        ],
    }
}

fn outcome_json(result: &Result<ChatSessionId, ChatError>) -> serde_json::Value {
    match result {
        Ok(session_id) => serde_json::json!({
            "success": true,
            "session_id": session_id,
        }),
        Err(ChatError::Validation(errors)) => {
            let fields: serde_json::Map<String, serde_json::Value> = errors
                .iter()
                .map(|(field, msg)| (field.to_string(), serde_json::Value::from(msg)))
                .collect();
            serde_json::json!({ "success": false, "errors": fields })
        }
        Err(e) => serde_json::json!({
            "success": false,
            "error": e.to_string(),
        }),
    }
}
