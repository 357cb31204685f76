//! Input hygiene helpers for the session boundary.
//!
//! `sanitize_input` runs on every raw user message before it reaches the
//! controller. The email/phone validators are available to callers that
//! want to vet collected contact details; the conversation flow itself
//! does not enforce them.

use std::sync::OnceLock;

use regex::Regex;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[\w.\-]+@[\w.\-]+\.\w+$").expect("static pattern"))
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?[\d\s().\-]{10,}$").expect("static pattern"))
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("static pattern"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email.trim())
}

/// Loose phone check: optional leading `+`, then at least ten digits,
/// spaces, parentheses, dots, or dashes.
pub fn is_valid_phone(phone: &str) -> bool {
    phone_pattern().is_match(phone.trim())
}

/// Strips HTML-style tags from raw user input.
pub fn sanitize_input(text: &str) -> String {
    tag_pattern().replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, is_valid_phone, sanitize_input};

    #[test]
    fn accepts_common_email_shapes() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("first.last@sub.domain.co"));
        assert!(is_valid_email("  padded@example.com  "));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("two words@example.com"));
    }

    #[test]
    fn accepts_international_phone_formats() {
        assert!(is_valid_phone("+47 555 010 200"));
        assert!(is_valid_phone("(555) 010-0200"));
        assert!(is_valid_phone("5550100200"));
    }

    #[test]
    fn rejects_short_or_alphabetic_phones() {
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("call me maybe"));
    }

    #[test]
    fn sanitize_strips_markup_but_keeps_text() {
        assert_eq!(sanitize_input("<b>Ana</b> <script>x</script>Lovelace"), "Ana xLovelace");
        assert_eq!(sanitize_input("plain text"), "plain text");
    }
}
