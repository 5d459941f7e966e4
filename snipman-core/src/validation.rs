//! Form validation
//!
//! Each form is checked field by field and every failure is reported, not
//! just the first one. Lengths count characters, not bytes.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationErrors, ValidationResult};
use crate::models::SnippetDraft;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("Invalid regex pattern")
    })
}

/// Returns true if `value` looks like `local@domain.tld`
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn require(errors: &mut ValidationErrors, field: &'static str, value: &str, message: &str) {
    if value.is_empty() {
        errors.push(field, message);
    }
}

fn min_chars(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    min: usize,
    message: &str,
) {
    if char_len(value) < min {
        errors.push(field, message);
    }
}

fn email(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if !is_valid_email(value) {
        errors.push(field, "Please enter a valid email address");
    }
}

/// Validates a snippet form submission
///
/// # Errors
///
/// Returns every empty required field.
pub fn validate_snippet(draft: &SnippetDraft) -> ValidationResult {
    let mut errors = ValidationErrors::new();
    require(&mut errors, "title", &draft.title, "Title is required");
    require(&mut errors, "code", &draft.code, "Code is required");
    require(&mut errors, "language", &draft.language, "Language is required");
    errors.into_result()
}

/// Contact form fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Subject line
    pub subject: String,
    /// Message body
    pub message: String,
}

impl ContactForm {
    /// Validates the form
    ///
    /// # Errors
    ///
    /// Returns every field that is too short or malformed.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        min_chars(
            &mut errors,
            "name",
            &self.name,
            2,
            "Name must be at least 2 characters",
        );
        email(&mut errors, "email", &self.email);
        min_chars(
            &mut errors,
            "subject",
            &self.subject,
            3,
            "Subject must be at least 3 characters",
        );
        min_chars(
            &mut errors,
            "message",
            &self.message,
            10,
            "Message must be at least 10 characters",
        );
        errors.into_result()
    }
}

/// Sign-up form fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    /// Account email
    pub email: String,
    /// Chosen password
    pub password: String,
    /// Password repeated
    pub confirm_password: String,
}

impl SignUpForm {
    /// Validates the form
    ///
    /// # Errors
    ///
    /// Returns every failing field; a mismatch is reported on `confirmPassword`.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        email(&mut errors, "email", &self.email);
        min_chars(
            &mut errors,
            "password",
            &self.password,
            8,
            "Password must be at least 8 characters",
        );
        if self.password != self.confirm_password {
            errors.push("confirmPassword", "Passwords do not match");
        }
        errors.into_result()
    }
}

/// Sign-in form fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInForm {
    /// Account email
    pub email: String,
    /// Password
    pub password: String,
}

impl SignInForm {
    /// Validates the form
    ///
    /// # Errors
    ///
    /// Returns every failing field.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        email(&mut errors, "email", &self.email);
        require(&mut errors, "password", &self.password, "Password is required");
        errors.into_result()
    }
}
