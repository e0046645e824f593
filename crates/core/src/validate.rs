//! Client-side form validation.
//!
//! Field-scoped checks that block submission before any network call. None
//! of this is a security boundary; the backend revalidates everything.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ticket::CreateTicketData;
use crate::user::{LoginCredentials, RegisterData};

pub const TITLE_MIN: usize = 5;
pub const TITLE_MAX: usize = 200;
pub const DESCRIPTION_MIN: usize = 10;
pub const DESCRIPTION_MAX: usize = 2000;
pub const PASSWORD_MIN: usize = 6;

/// A validation failure scoped to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Coarse password strength grade shown next to the register form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

/// Minimal structural email check; deliverability is the backend's problem.
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if local.chars().any(char::is_whitespace) || domain.chars().any(char::is_whitespace) {
        return false;
    }
    let mut domain_parts = domain.split('.');
    let Some(first) = domain_parts.next() else {
        return false;
    };
    let rest: Vec<&str> = domain_parts.collect();
    !first.is_empty() && !rest.is_empty() && rest.iter().all(|p| !p.is_empty())
}

/// Grade a password: length >= 8, mixed case, a digit, and a symbol each
/// add a point. Below the minimum length everything is weak.
pub fn password_strength(password: &str) -> PasswordStrength {
    if password.len() < PASSWORD_MIN {
        return PasswordStrength::Weak;
    }

    let mut strength = 0;
    if password.len() >= 8 {
        strength += 1;
    }
    if password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
    {
        strength += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        strength += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        strength += 1;
    }

    match strength {
        0 | 1 => PasswordStrength::Weak,
        2 | 3 => PasswordStrength::Medium,
        _ => PasswordStrength::Strong,
    }
}

/// Validate a new-ticket form.
pub fn validate_create_ticket(data: &CreateTicketData) -> ValidationResult {
    let mut errors = Vec::new();

    let title_len = data.title.trim().chars().count();
    if title_len < TITLE_MIN {
        errors.push(ValidationError::new(
            "title",
            format!("Title must be at least {TITLE_MIN} characters"),
        ));
    } else if title_len > TITLE_MAX {
        errors.push(ValidationError::new(
            "title",
            format!("Title must be at most {TITLE_MAX} characters"),
        ));
    }

    let description_len = data.description.trim().chars().count();
    if description_len < DESCRIPTION_MIN {
        errors.push(ValidationError::new(
            "description",
            format!("Description must be at least {DESCRIPTION_MIN} characters"),
        ));
    } else if description_len > DESCRIPTION_MAX {
        errors.push(ValidationError::new(
            "description",
            format!("Description must be at most {DESCRIPTION_MAX} characters"),
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate a login form.
pub fn validate_login(credentials: &LoginCredentials) -> ValidationResult {
    let mut errors = Vec::new();

    if !is_valid_email(&credentials.email) {
        errors.push(ValidationError::new("email", "Enter a valid email address"));
    }
    if credentials.password.is_empty() {
        errors.push(ValidationError::new("password", "Password is required"));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate a registration form.
pub fn validate_register(data: &RegisterData) -> ValidationResult {
    let mut errors = Vec::new();

    if data.name.trim().is_empty() {
        errors.push(ValidationError::new("name", "Name is required"));
    }
    if !is_valid_email(&data.email) {
        errors.push(ValidationError::new("email", "Enter a valid email address"));
    }
    if data.password.len() < PASSWORD_MIN {
        errors.push(ValidationError::new(
            "password",
            format!("Password must be at least {PASSWORD_MIN} characters"),
        ));
    }
    if data.password != data.confirm_password {
        errors.push(ValidationError::new(
            "confirmPassword",
            "Passwords do not match",
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::TicketPriority;
    use proptest::prelude::*;

    fn ticket(title: &str, description: &str) -> CreateTicketData {
        CreateTicketData {
            title: title.to_owned(),
            description: description.to_owned(),
            priority: TicketPriority::Medium,
            category: None,
        }
    }

    #[test]
    fn title_below_minimum_rejected() {
        let errors = validate_create_ticket(&ticket("Bug!", "Something is quite broken"))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn valid_ticket_accepted() {
        assert!(validate_create_ticket(&ticket("Login broken", "Cannot sign in since Tuesday")).is_ok());
    }

    #[test]
    fn overlong_fields_rejected() {
        let errors =
            validate_create_ticket(&ticket(&"x".repeat(201), &"y".repeat(2001))).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "description"]);
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.co"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("user@@example.com"));
    }

    #[test]
    fn password_grading() {
        assert_eq!(password_strength("abc"), PasswordStrength::Weak);
        assert_eq!(password_strength("abcdef"), PasswordStrength::Weak);
        assert_eq!(password_strength("abcdefgh"), PasswordStrength::Weak);
        assert_eq!(password_strength("Abcdefg1"), PasswordStrength::Medium);
        assert_eq!(password_strength("Abcdefg1!"), PasswordStrength::Strong);
    }

    #[test]
    fn register_password_mismatch() {
        let data = RegisterData {
            name: "Alice".to_owned(),
            email: "alice@example.com".to_owned(),
            password: "Abcdef12".to_owned(),
            confirm_password: "Abcdef13".to_owned(),
        };
        let errors = validate_register(&data).unwrap_err();
        assert_eq!(errors[0].field, "confirmPassword");
    }

    proptest! {
        // Appending characters can only add length and character classes,
        // so the grade never goes down.
        #[test]
        fn grade_never_drops_when_extended(base in "[ -~]{0,20}", suffix in "[ -~]{1,8}") {
            let before = password_strength(&base);
            let after = password_strength(&format!("{base}{suffix}"));
            prop_assert!(after >= before);
        }

        #[test]
        fn short_passwords_always_weak(password in "[ -~]{0,5}") {
            prop_assert_eq!(password_strength(&password), PasswordStrength::Weak);
        }
    }
}
