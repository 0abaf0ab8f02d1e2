use crate::config::ParserConfig;
use crate::inference::{EntityTagger, InferenceResult};
use crate::response::{PersonalData, SummaryData};
use crate::text::{capitalize, merge_doubled_words};

/// Candidate name and current designation found in the headline segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headline {
    pub full_name: String,
    pub summary: SummaryData,
}

/// Tags the headline and keeps person and designation spans, in order.
pub fn parse_headline(
    text: &str,
    tagger: &dyn EntityTagger,
    config: &ParserConfig,
) -> InferenceResult<Headline> {
    let mut name = Vec::new();
    let mut designation = Vec::new();

    for span in tagger.tag(text)? {
        if span.entity_type == config.designation_tag {
            designation.push(span.text);
        } else if span.entity_type == config.person_tag {
            name.push(span.text);
        }
    }

    Ok(Headline {
        full_name: merge_doubled_words(&name.join(" ")),
        summary: SummaryData {
            description: merge_doubled_words(&designation.join(" ")),
            ..SummaryData::default()
        },
    })
}

fn capitalize_words(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a full name into first, middle and family names.
#[must_use]
pub fn parse_personal(full_name: &str) -> PersonalData {
    let parts: Vec<&str> = full_name.split_whitespace().collect();

    let (first, middle, last): (&[&str], &[&str], &[&str]) = match parts.as_slice() {
        [] => (&[], &[], &[]),
        [first] => (std::slice::from_ref(first), &[], &[]),
        [first, middle @ .., last] => (
            std::slice::from_ref(first),
            middle,
            std::slice::from_ref(last),
        ),
    };

    PersonalData {
        full_name: full_name.to_string(),
        first_name: capitalize_words(first),
        middle_name: capitalize_words(middle),
        family_name: capitalize_words(last),
        ..PersonalData::default()
    }
}
