//! Date mentions: scanning lines for date-shaped tokens and pairing the
//! tokens that share a line into start/end intervals.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b\d{1,2}[-/](?:\d{1,2}|[a-zA-Z]+)[-/]\d{2,4}\b",
        r"|\b\d{1,2}[-/]\d{2,4}\b",
        r"|\b(?i:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*)\s+(?:\d{1,2},?\s+)?\d{2,4}\b",
        r"|\b\d{4}\b",
    ))
    .expect("date pattern is valid")
});

static TEXTUAL_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z]+)\.?\s+(?:(\d{1,2}),?\s+)?(\d{2,4})$")
        .expect("textual date pattern is valid")
});

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// A date-shaped substring and the index of the line it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateToken {
    pub raw: String,
    pub line: usize,
}

impl DateToken {
    #[must_use]
    pub fn new(raw: impl Into<String>, line: usize) -> Self {
        Self {
            raw: raw.into(),
            line,
        }
    }
}

/// Calendar month, the resolution every extracted date is reduced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthYear {
    pub year: i32,
    pub month: u32,
}

impl MonthYear {
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }
}

impl std::fmt::Display for MonthYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

/// Absolute number of months between two dates.
#[must_use]
pub fn month_delta(start: MonthYear, end: MonthYear) -> u32 {
    let delta = 12 * (i64::from(end.year) - i64::from(start.year))
        + (i64::from(end.month) - i64::from(start.month));
    u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX)
}

/// Two dates found on the same line, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePair {
    pub start: DateToken,
    pub end: DateToken,
    pub start_date: MonthYear,
    pub end_date: MonthYear,
}

impl DatePair {
    /// Anchor line of the pair.
    #[must_use]
    pub fn line(&self) -> usize {
        self.start.line
    }

    #[must_use]
    pub fn month_delta(&self) -> u32 {
        month_delta(self.start_date, self.end_date)
    }
}

/// Groups tokens by line and keeps the lines holding exactly two tokens.
///
/// Output is ordered by line index; each pair keeps left-to-right order.
#[must_use]
pub fn group_by_line(tokens: &[DateToken]) -> Vec<(DateToken, DateToken)> {
    let mut buckets: BTreeMap<usize, Vec<&DateToken>> = BTreeMap::new();
    for token in tokens {
        buckets.entry(token.line).or_default().push(token);
    }

    buckets
        .into_values()
        .filter_map(|bucket| match bucket.as_slice() {
            [start, end] => Some(((*start).clone(), (*end).clone())),
            _ => None,
        })
        .collect()
}

pub struct DateExtractor {
    present: Option<Regex>,
    today: NaiveDate,
}

impl DateExtractor {
    /// `present_keywords` are whole words meaning "until today"; they are
    /// rewritten to `today` before scanning.
    #[must_use]
    pub fn new(present_keywords: &[String], today: NaiveDate) -> Self {
        let present = if present_keywords.is_empty() {
            None
        } else {
            let alternatives = present_keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&format!(r"(?i)\b(?:{alternatives})\b")).ok()
        };

        Self { present, today }
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Date tokens of every line, ordered by line index then position.
    #[must_use]
    pub fn extract(&self, lines: &[String]) -> Vec<DateToken> {
        let today = self.today.format("%d/%m/%Y").to_string();

        let mut tokens: Vec<DateToken> = lines
            .iter()
            .enumerate()
            .flat_map(|(idx, line)| {
                let line = match &self.present {
                    Some(present) => present.replace_all(line, today.as_str()).into_owned(),
                    None => line.clone(),
                };
                DATE_RE
                    .find_iter(&line)
                    .map(|m| DateToken::new(m.as_str(), idx))
                    .collect::<Vec<_>>()
            })
            .collect();

        tokens.sort_by_key(|t| t.line);
        tokens
    }

    /// Parses a token day-first. Missing components default to today's.
    #[must_use]
    pub fn parse(&self, raw: &str) -> Option<MonthYear> {
        let raw = raw.trim();

        if let Some(caps) = TEXTUAL_DATE_RE.captures(raw) {
            let month = month_from_name(&caps[1])?;
            let year = self.expand_year(&caps[3])?;
            if let Some(day) = caps.get(2) {
                let day = day.as_str().parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)?;
            }
            return MonthYear::new(year, month);
        }

        let parts: Vec<&str> = raw.split(['-', '/']).collect();
        match parts.as_slice() {
            [year] if year.len() == 4 => MonthYear::new(self.expand_year(year)?, self.today.month()),
            [month, year] => MonthYear::new(self.expand_year(year)?, month.parse().ok()?),
            [day, month, year] => {
                let year = self.expand_year(year)?;
                let mut day: u32 = day.parse().ok()?;
                let mut month = match month.parse::<u32>() {
                    Ok(month) => month,
                    Err(_) => month_from_name(month)?,
                };
                if month > 12 && day <= 12 {
                    std::mem::swap(&mut day, &mut month);
                }
                NaiveDate::from_ymd_opt(year, month, day)?;
                MonthYear::new(year, month)
            }
            _ => None,
        }
    }

    /// Pairs found anywhere in `lines` that belong to `segment_text`: both
    /// dates must parse and at least one raw token must occur in the segment.
    #[must_use]
    pub fn pairs_for_segment(&self, lines: &[String], segment_text: &str) -> Vec<DatePair> {
        let tokens = self.extract(lines);
        let segment = segment_text.to_lowercase();

        group_by_line(&tokens)
            .into_iter()
            .filter_map(|(start, end)| {
                let start_date = self.parse(&start.raw)?;
                let end_date = self.parse(&end.raw)?;
                let in_segment = segment.contains(&start.raw.to_lowercase())
                    || segment.contains(&end.raw.to_lowercase());
                in_segment.then_some(DatePair {
                    start,
                    end,
                    start_date,
                    end_date,
                })
            })
            .collect()
    }

    fn expand_year(&self, digits: &str) -> Option<i32> {
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let value: i32 = digits.parse().ok()?;

        match digits.len() {
            4 => Some(value),
            2 => {
                let current = self.today.year();
                let mut year = current - current.rem_euclid(100) + value;
                if year > current + 49 {
                    year -= 100;
                } else if year < current - 50 {
                    year += 100;
                }
                Some(year)
            }
            _ => None,
        }
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let prefix = lower.get(..3)?;
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .and_then(|i| u32::try_from(i + 1).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> DateExtractor {
        let keywords = vec!["present".to_string(), "now".to_string(), "actual".to_string()];
        DateExtractor::new(&keywords, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    }

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| (*l).to_string()).collect()
    }

    fn my(year: i32, month: u32) -> MonthYear {
        MonthYear::new(year, month).unwrap()
    }

    #[test]
    fn test_extract_tokens_in_line_order() {
        let tokens = extractor().extract(&lines(&[
            "Acme Corp",
            "01/2019 - 06/2021",
            "Jan 2015 - Present",
        ]));

        assert_eq!(
            tokens,
            vec![
                DateToken::new("01/2019", 1),
                DateToken::new("06/2021", 1),
                DateToken::new("Jan 2015", 2),
                DateToken::new("18/10/2026", 2),
            ]
        );
    }

    #[test]
    fn test_present_keyword_requires_whole_word() {
        let tokens = extractor().extract(&lines(&["Knowledge of 2019 tooling"]));
        assert_eq!(tokens, vec![DateToken::new("2019", 0)]);
    }

    #[test]
    fn test_textual_forms() {
        let tokens = extractor().extract(&lines(&["September 15, 2020 to DECEMBER 2021"]));
        assert_eq!(
            tokens,
            vec![
                DateToken::new("September 15, 2020", 0),
                DateToken::new("DECEMBER 2021", 0),
            ]
        );
    }

    #[test]
    fn test_parse_forms() {
        let dates = extractor();
        assert_eq!(dates.parse("03/2018"), Some(my(2018, 3)));
        assert_eq!(dates.parse("15/03/2019"), Some(my(2019, 3)));
        assert_eq!(dates.parse("03/15/2019"), Some(my(2019, 3)));
        assert_eq!(dates.parse("01-Feb-2017"), Some(my(2017, 2)));
        assert_eq!(dates.parse("September 2020"), Some(my(2020, 9)));
        assert_eq!(dates.parse("Sep 19"), Some(my(2019, 9)));
        assert_eq!(dates.parse("Jan 5, 2016"), Some(my(2016, 1)));
        assert_eq!(dates.parse("2017"), Some(my(2017, 10)));
        assert_eq!(dates.parse("05/98"), Some(my(1998, 5)));
    }

    #[test]
    fn test_parse_rejects_invalid_dates() {
        let dates = extractor();
        assert_eq!(dates.parse("13/2019"), None);
        assert_eq!(dates.parse("31/02/2019"), None);
        assert_eq!(dates.parse("12/345"), None);
        assert_eq!(dates.parse("Foo 2019"), None);
    }

    #[test]
    fn test_group_by_line_requires_exactly_two() {
        let tokens = vec![
            DateToken::new("2012", 2),
            DateToken::new("01/2019", 5),
            DateToken::new("2019", 5),
            DateToken::new("05/2020", 5),
            DateToken::new("2014", 8),
            DateToken::new("2016", 8),
        ];

        let pairs = group_by_line(&tokens);
        assert_eq!(
            pairs,
            vec![(DateToken::new("2014", 8), DateToken::new("2016", 8))]
        );
    }

    #[test]
    fn test_month_delta() {
        assert_eq!(month_delta(my(2018, 3), my(2021, 6)), 39);
        assert_eq!(month_delta(my(2020, 1), my(2020, 3)), 2);
        assert_eq!(month_delta(my(2021, 6), my(2018, 3)), 39);
        assert_eq!(my(2018, 3).to_string(), "03/2018");
    }

    #[test]
    fn test_pairs_scoped_to_segment() {
        let doc = lines(&[
            "Experience",
            "Acme Corp 03/2018 - 06/2021",
            "Education",
            "MIT 09/2010 - 06/2014",
        ]);
        let segment = "Experience Acme Corp 03/2018 - 06/2021";

        let pairs = extractor().pairs_for_segment(&doc, segment);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].line(), 1);
        assert_eq!(pairs[0].start_date, my(2018, 3));
        assert_eq!(pairs[0].end_date, my(2021, 6));
        assert_eq!(pairs[0].month_delta(), 39);
    }

    #[test]
    fn test_pairs_drop_unparsable() {
        let doc = lines(&["Acme 13/2019 - 06/2021"]);
        assert!(extractor().pairs_for_segment(&doc, &doc[0]).is_empty());
    }

    #[test]
    fn test_pairs_with_present_keyword() {
        let doc = lines(&["Globex Jan 2020 - now"]);
        let pairs = extractor().pairs_for_segment(&doc, "Globex Jan 2020 - now");

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].end.raw, "18/10/2026");
        assert_eq!(pairs[0].end_date, my(2026, 10));
    }

    #[test]
    fn test_single_date_document_has_no_pairs() {
        let doc = lines(&["Joined Acme in 2019"]);
        assert!(extractor().pairs_for_segment(&doc, &doc[0]).is_empty());
    }
}
