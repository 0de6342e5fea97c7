//! Input validation for the REST and GraphQL surfaces.
//!
//! Checks collect into a list of messages so a 422 can report every rejected
//! field at once.

/// Minimum length for post titles and content, after trimming.
const MIN_TEXT_LEN: usize = 5;
/// Minimum password length, after trimming.
const MIN_PASSWORD_LEN: usize = 5;

pub fn validate_signup(email: &str, password: &str, name: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if !is_valid_email(email) {
        errors.push("Please enter a valid email".to_string());
    }
    if password.trim().len() < MIN_PASSWORD_LEN {
        errors.push(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    if name.trim().is_empty() {
        errors.push("Name must not be empty".to_string());
    }
    errors
}

pub fn validate_post_input(title: &str, content: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if title.trim().len() < MIN_TEXT_LEN {
        errors.push(format!(
            "Title must be at least {} characters",
            MIN_TEXT_LEN
        ));
    }
    if content.trim().len() < MIN_TEXT_LEN {
        errors.push(format!(
            "Content must be at least {} characters",
            MIN_TEXT_LEN
        ));
    }
    errors
}

pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}
