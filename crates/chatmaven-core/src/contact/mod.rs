//! Contact form collaborator: validation and submission.

pub mod submit;
pub mod validate;

pub use submit::submit_contact_form;
pub use validate::validate;
