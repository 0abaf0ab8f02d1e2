//! Parsers for the fields outside the dated sections.

mod contact;
mod headline;
mod languages;
mod metadata;
mod skills;

pub use contact::{parse_contact, parse_emails, parse_phone_numbers, parse_url, PHONE_TYPE};
pub use headline::{parse_headline, parse_personal, Headline};
pub use languages::parse_languages;
pub use metadata::{generate_metadata, ParseStatus};
pub use skills::parse_skills;
