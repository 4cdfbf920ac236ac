//! Contact form field validation.

use std::sync::LazyLock;

use regex::Regex;

use chatmaven_types::contact::{ContactField, ContactForm, ValidationErrors};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+)*@(?:[A-Za-z0-9_-]+\.)+[a-zA-Z]{2,7}$")
        .expect("email pattern is valid")
});

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("digits pattern is valid"));

/// Validate every field, collecting all failures.
///
/// Emptiness is checked on trimmed values; the email and phone patterns
/// are matched against the value as entered.
pub fn validate(form: &ContactForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if form.name.trim().is_empty() {
        errors.add(ContactField::Name, "Name is required");
    }

    if form.email.trim().is_empty() {
        errors.add(ContactField::Email, "Email is required");
    } else if !EMAIL.is_match(&form.email) {
        errors.add(ContactField::Email, "Invalid email format");
    }

    if form.phone.trim().is_empty() {
        errors.add(ContactField::Phone, "Phone Number is required");
    } else if !DIGITS.is_match(&form.phone) {
        errors.add(ContactField::Phone, "Phone Number must contain only digits");
    }

    if form.message.trim().is_empty() {
        errors.add(ContactField::Message, "Message is required");
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Ada Lovelace".to_string(),
            email: "ada.lovelace@example.co.uk".to_string(),
            phone: "5551234".to_string(),
            message: "Please call me back".to_string(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(validate(&valid_form()).is_ok());
    }

    #[test]
    fn test_empty_form_reports_all_fields() {
        let errors = validate(&ContactForm::default()).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(ContactField::Name), Some("Name is required"));
        assert_eq!(errors.get(ContactField::Email), Some("Email is required"));
        assert_eq!(errors.get(ContactField::Phone), Some("Phone Number is required"));
        assert_eq!(errors.get(ContactField::Message), Some("Message is required"));
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let form = ContactForm {
            name: "   ".to_string(),
            message: "\n\t".to_string(),
            ..valid_form()
        };
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.get(ContactField::Name).is_some());
        assert!(errors.get(ContactField::Message).is_some());
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "ada",
            "ada@",
            "@example.com",
            "ada@example",
            "ada@example.c",
            "a b@example.com",
            "josé@example.com",
        ] {
            let form = ContactForm {
                email: email.to_string(),
                ..valid_form()
            };
            let errors = validate(&form).unwrap_err();
            assert_eq!(
                errors.get(ContactField::Email),
                Some("Invalid email format"),
                "expected {email:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_valid_emails() {
        for email in ["a@b.io", "first-last@sub.domain.org", "x_y.z@mail-host.travel"] {
            let form = ContactForm {
                email: email.to_string(),
                ..valid_form()
            };
            assert!(validate(&form).is_ok(), "expected {email:?} to pass");
        }
    }

    #[test]
    fn test_phone_digits_only() {
        for phone in ["555-1234", "+15551234", "555 1234", "12a"] {
            let form = ContactForm {
                phone: phone.to_string(),
                ..valid_form()
            };
            let errors = validate(&form).unwrap_err();
            assert_eq!(
                errors.get(ContactField::Phone),
                Some("Phone Number must contain only digits")
            );
        }
    }
}
