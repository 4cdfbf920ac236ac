//! Errors from the conversation service port and the widget's chat operations.

use thiserror::Error;

use crate::contact::ValidationErrors;

/// Errors from the remote conversation service port.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("service reported failure: {0}")]
    Unsuccessful(String),

    #[error("service response carried no data")]
    MissingData,
}

/// Errors surfaced by the session manager and contact form.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("session creation failed: {0}")]
    SessionCreationFailed(String),

    #[error("message insert failed: {0}")]
    MessageInsertFailed(String),

    #[error("message fetch failed: {0}")]
    FetchFailed(String),

    #[error("form submission failed: {0}")]
    FormSubmissionFailed(String),

    #[error("invalid contact form: {0}")]
    Validation(ValidationErrors),
}
