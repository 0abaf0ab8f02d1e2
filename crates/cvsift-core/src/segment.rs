use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::{ConfigError, HeaderConfig};
use crate::text::words;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentName {
    Headline,
    Objective,
    Experience,
    Education,
    Skills,
    Misc,
    Accomplishments,
}

impl SegmentName {
    pub const ALL: [Self; 7] = [
        Self::Headline,
        Self::Objective,
        Self::Experience,
        Self::Education,
        Self::Skills,
        Self::Misc,
        Self::Accomplishments,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Headline => "headline",
            Self::Objective => "objective",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Skills => "skills",
            Self::Misc => "misc",
            Self::Accomplishments => "accomplishments",
        }
    }
}

impl std::fmt::Display for SegmentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SegmentName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownSegment(s.to_string()))
    }
}

/// Segment texts keyed by name. Holds exactly one entry per configured header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Segments(BTreeMap<SegmentName, String>);

impl Segments {
    /// Text of a segment, empty when the segment is not configured.
    #[must_use]
    pub fn get(&self, name: SegmentName) -> &str {
        self.0.get(&name).map_or("", String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SegmentName, &str)> {
        self.0.iter().map(|(name, text)| (*name, text.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn set(&mut self, name: SegmentName, text: &str) {
        self.0.insert(name, text.trim().to_string());
    }
}

/// Similarity of `phrase` to its closest run of words in `text_words`, in [0, 1].
fn phrase_score(phrase: &str, text_words: &[String]) -> f64 {
    let phrase_words = words(phrase);
    if phrase_words.is_empty() || text_words.is_empty() {
        return 0.0;
    }

    let needle = phrase_words.join(" ");
    let width = phrase_words.len().min(text_words.len());

    text_words
        .windows(width)
        .map(|window| strsim::normalized_levenshtein(&needle, &window.join(" ")))
        .fold(0.0, f64::max)
}

/// Splits resume text into named segments by locating section headers.
pub struct Segmenter<'a> {
    config: &'a HeaderConfig,
}

impl<'a> Segmenter<'a> {
    #[must_use]
    pub fn new(config: &'a HeaderConfig) -> Self {
        Self { config }
    }

    /// Picks the keyword most similar to some run of words in `text` and
    /// returns the byte offset of its first literal, case-insensitive
    /// occurrence. Equal scores keep the earlier keyword.
    #[must_use]
    pub fn find_header(&self, text: &str, keywords: &[String]) -> Option<usize> {
        let text_words = words(text);

        let mut best: Option<(&str, f64)> = None;
        for keyword in keywords {
            let score = phrase_score(keyword, &text_words);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((keyword, score));
            }
        }

        let (phrase, score) = best?;
        let pattern = RegexBuilder::new(&regex::escape(phrase))
            .case_insensitive(true)
            .build()
            .ok()?;

        let offset = pattern.find(text).map(|m| m.start());
        tracing::trace!(phrase, score, ?offset, "Best header keyword");
        offset
    }

    #[must_use]
    pub fn segment(&self, text: &str) -> Segments {
        let mut resolved: Vec<(SegmentName, usize)> = Vec::new();
        let mut unresolved: Vec<SegmentName> = Vec::new();

        for header in &self.config.headers {
            let offset = if header.keywords.is_empty() {
                None
            } else {
                self.find_header(text, &header.keywords)
            };

            match offset {
                Some(offset) => resolved.push((header.name, offset)),
                None => unresolved.push(header.name),
            }
        }

        let mut segments = Segments::default();

        // Stable sort: headers sharing an offset keep declaration order.
        resolved.sort_by_key(|(_, offset)| *offset);

        let (Some(&(_, first_offset)), Some(&(_, last_offset))) =
            (resolved.first(), resolved.last())
        else {
            tracing::debug!("No section header found; using catch-all segment");
            for header in &self.config.headers {
                let content = if header.name == self.config.default_segment {
                    text
                } else {
                    ""
                };
                segments.set(header.name, content);
            }
            return segments;
        };

        for (i, &(name, start)) in resolved.iter().enumerate() {
            let end = resolved.get(i + 1).map_or(text.len(), |&(_, next)| next);
            segments.set(name, &text[start..end]);
        }

        for name in unresolved {
            let content = if self.config.top_segments.contains(&name) {
                &text[..first_offset]
            } else if self.config.bottom_segments.contains(&name) {
                &text[last_offset..]
            } else {
                // Unresolved middle headers stay empty rather than borrowing text.
                ""
            };
            segments.set(name, content);
        }

        tracing::debug!(
            resolved = resolved.len(),
            first_offset,
            last_offset,
            "Segmented document"
        );

        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeaderKeywordSet;

    const RESUME: &str = "Jane Doe jane@example.com Data engineer \
        Summary Passionate engineer building pipelines \
        Work Experience 01/2019 - 06/2021 Acme Corp Senior Engineer Paris, France \
        Education 09/2014 - 06/2018 University of Lyon MSc Computer Science \
        Skills Rust Python SQL \
        Interests Chess hiking";

    #[test]
    fn test_segment_name_roundtrip() {
        for name in SegmentName::ALL {
            assert_eq!(name.as_str().parse::<SegmentName>().unwrap(), name);
        }
        assert!("unknown".parse::<SegmentName>().is_err());
    }

    #[test]
    fn test_find_header_prefers_literal_match() {
        let config = HeaderConfig::default();
        let segmenter = Segmenter::new(&config);
        let keywords = &config.headers[1].keywords;

        let offset = segmenter.find_header(RESUME, keywords).unwrap();
        assert!(RESUME[offset..].starts_with("Education"));
    }

    #[test]
    fn test_find_header_tie_keeps_first_declared() {
        let config = HeaderConfig::default();
        let segmenter = Segmenter::new(&config);
        let text = "Awards and Grants listed here";
        let keywords = vec!["grants".to_string(), "awards".to_string()];

        let offset = segmenter.find_header(text, &keywords).unwrap();
        assert_eq!(&text[offset..offset + 6], "Grants");
    }

    #[test]
    fn test_find_header_without_literal_occurrence() {
        let config = HeaderConfig::default();
        let segmenter = Segmenter::new(&config);
        let keywords = vec!["education".to_string()];

        assert_eq!(segmenter.find_header("Educaton history", &keywords), None);
    }

    #[test]
    fn test_segment_standard_resume() {
        let config = HeaderConfig::default();
        let segments = Segmenter::new(&config).segment(RESUME);

        assert_eq!(segments.len(), 7);
        assert_eq!(
            segments.get(SegmentName::Headline),
            "Jane Doe jane@example.com Data engineer"
        );
        assert!(segments.get(SegmentName::Objective).starts_with("Summary"));
        assert!(segments.get(SegmentName::Experience).starts_with("Work Experience"));
        assert!(segments.get(SegmentName::Experience).ends_with("Paris, France"));
        assert!(segments.get(SegmentName::Education).starts_with("Education"));
        assert_eq!(segments.get(SegmentName::Skills), "Skills Rust Python SQL");
        assert_eq!(segments.get(SegmentName::Misc), "Interests Chess hiking");
    }

    #[test]
    fn test_segments_are_substrings_of_input() {
        let config = HeaderConfig::default();
        let segments = Segmenter::new(&config).segment(RESUME);

        for (_, text) in segments.iter() {
            assert!(RESUME.contains(text));
        }
    }

    #[test]
    fn test_segment_is_deterministic() {
        let config = HeaderConfig::default();
        let segmenter = Segmenter::new(&config);
        assert_eq!(segmenter.segment(RESUME), segmenter.segment(RESUME));
    }

    #[test]
    fn test_unresolved_bottom_segment_takes_suffix() {
        let config = HeaderConfig::default();
        let text = "John Smith Experience 2015 2019 Globex Education 2010 2014 MIT";
        let segments = Segmenter::new(&config).segment(text);

        assert_eq!(segments.get(SegmentName::Headline), "John Smith");
        assert_eq!(segments.get(SegmentName::Objective), "John Smith");
        assert_eq!(segments.get(SegmentName::Education), "Education 2010 2014 MIT");
        assert_eq!(segments.get(SegmentName::Misc), "Education 2010 2014 MIT");
        assert_eq!(segments.get(SegmentName::Skills), "");
    }

    #[test]
    fn test_no_headers_falls_back_to_catch_all() {
        let config = HeaderConfig {
            headers: vec![
                HeaderKeywordSet::new(SegmentName::Education, &["education"]),
                HeaderKeywordSet::new(SegmentName::Misc, &["interests"]),
                HeaderKeywordSet::new(SegmentName::Headline, &[]),
            ],
            ..HeaderConfig::default()
        };
        let text = "  plain text without any section  ";
        let segments = Segmenter::new(&config).segment(text);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments.get(SegmentName::Misc), "plain text without any section");
        assert_eq!(segments.get(SegmentName::Education), "");
        assert_eq!(segments.get(SegmentName::Headline), "");
    }

    #[test]
    fn test_empty_text() {
        let config = HeaderConfig::default();
        let segments = Segmenter::new(&config).segment("");
        assert_eq!(segments.len(), 7);
        assert!(segments.iter().all(|(_, text)| text.is_empty()));
    }
}
