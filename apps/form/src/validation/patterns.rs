//! Lenient shape checks for email addresses and portfolio links.
//!
//! The intake backend applies the same expressions, so these must stay in
//! step with it rather than with any RFC.

use std::sync::LazyLock;

use regex::Regex;

/// Something, `@`, something, `.`, something. Unanchored.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern must compile"));

/// Optional http(s) scheme, a dotted lowercase host, optional path.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?([0-9a-z.-]+)\.([a-z.]{2,256})([/A-Za-z0-9_ .-]*)*/?$")
        .expect("url pattern must compile")
});

/// Trims whitespace and byte-order marks from both ends, as the browser's
/// `trim` does.
pub fn trim_text(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

pub fn is_blank(value: &str) -> bool {
    trim_text(value).is_empty()
}

pub fn looks_like_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub fn looks_like_url(value: &str) -> bool {
    URL_PATTERN.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_order_marks_count_as_blank() {
        assert!(is_blank("\u{FEFF}\u{FEFF}"));
        assert!(is_blank(" \t\u{FEFF}\n"));
        assert!(!is_blank("\u{FEFF}Ada"));
        assert_eq!(trim_text("\u{FEFF} Rust \u{FEFF}"), "Rust");
    }

    #[test]
    fn test_email_accepts_lenient_shapes() {
        assert!(looks_like_email("ada@example.com"));
        assert!(looks_like_email("a@b.c"));
        assert!(looks_like_email("contact me: ada@mail.co.uk"));
    }

    #[test]
    fn test_email_rejects_missing_parts() {
        assert!(!looks_like_email("ada.example.com"));
        assert!(!looks_like_email("ada@example"));
        assert!(!looks_like_email("@."));
    }

    #[test]
    fn test_url_accepts_with_and_without_scheme() {
        assert!(looks_like_url("https://a.com"));
        assert!(looks_like_url("http://portfolio.example.io/work/2024"));
        assert!(looks_like_url("b.com"));
        assert!(looks_like_url("github.com/ada-obi/"));
    }

    #[test]
    fn test_url_rejects_non_urls() {
        assert!(!looks_like_url("not a link"));
        assert!(!looks_like_url("localhost"));
        assert!(!looks_like_url("ftp://files.example.com"));
    }

    #[test]
    fn test_url_host_is_case_sensitive() {
        assert!(!looks_like_url("https://Example.com"));
    }
}
