use regex::Regex;
use std::sync::LazyLock;

use crate::response::{ContactData, ContactDetail};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^@|\s]+@[^@]+\.[^@|\s]+").expect("email pattern is valid"));

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\d{3}[-.\s]??\d{3}[-.\s]??\d{4}",
        r"|\(\d{3}\)\s*\d{3}[-.\s]??\d{4}",
        r"|\d{3}[-.\s]??\d{4}",
    ))
    .expect("phone pattern is valid")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://|www\.)[^\s<>]+").expect("url pattern is valid")
});

pub const PHONE_TYPE: &str = "Telephone";

/// Email addresses, first whitespace-delimited token of each match.
#[must_use]
pub fn parse_emails(text: &str) -> Vec<ContactDetail> {
    EMAIL_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().split_whitespace().next())
        .map(|email| email.trim_matches(';'))
        .filter(|email| !email.is_empty())
        .map(ContactDetail::new)
        .collect()
}

#[must_use]
pub fn parse_phone_numbers(text: &str) -> Vec<ContactDetail> {
    PHONE_RE
        .find_iter(text)
        .map(|m| ContactDetail::new(m.as_str()).with_kind(PHONE_TYPE))
        .collect()
}

/// First URL in `text`, without trailing punctuation.
#[must_use]
pub fn parse_url(text: &str) -> Option<String> {
    URL_RE
        .find(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ')']).to_string())
}

#[must_use]
pub fn parse_contact(text: &str) -> ContactData {
    ContactData {
        email: parse_emails(text),
        phone: parse_phone_numbers(text),
        website: parse_url(text).into_iter().collect(),
        ..ContactData::default()
    }
}
