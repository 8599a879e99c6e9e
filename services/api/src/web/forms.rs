//! services/api/src/web/forms.rs
//!
//! Synchronous, client-shaped form validation. Runs before any store write;
//! a failed check blocks the write entirely and annotates the offending
//! field. Required-field checks only - no deeper schema enforcement.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use utoipa::ToSchema;

/// One annotated validation failure.
#[derive(Debug, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[6-9][0-9]{9}$").expect("valid phone regex"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_re().is_match(email.trim())
}

/// Accepts a 10-digit Indian mobile number, with or without a +91 prefix
/// and incidental spaces/dashes.
pub fn is_valid_indian_phone(phone: &str) -> bool {
    let digits: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    let digits = digits
        .strip_prefix("+91")
        .or_else(|| digits.strip_prefix("91").filter(|rest| rest.len() == 10))
        .unwrap_or(&digits);
    phone_re().is_match(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_digit_mobile_numbers_pass() {
        assert!(is_valid_indian_phone("9030200263"));
        assert!(is_valid_indian_phone("+91 9030200263"));
        assert!(is_valid_indian_phone("90302-00263"));
    }

    #[test]
    fn short_numbers_are_rejected() {
        assert!(!is_valid_indian_phone("98765"));
        assert!(!is_valid_indian_phone(""));
    }

    #[test]
    fn landline_style_prefixes_are_rejected() {
        // Indian mobiles start 6-9.
        assert!(!is_valid_indian_phone("0402345678"));
        assert!(!is_valid_indian_phone("1234567890"));
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("meera@example.in"));
        assert!(is_valid_email("  meera@example.in "));
        assert!(!is_valid_email("meera@example"));
        assert!(!is_valid_email("meera.example.in"));
        assert!(!is_valid_email("me era@example.in"));
    }
}
