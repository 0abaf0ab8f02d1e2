use regex::Regex;

use super::{window_bounds, ExtractionContext, WindowScores};
use crate::inference::{classify_top, Classifier, InferenceResult};
use crate::response::{Education, EducationData};
use crate::text::filter_stopwords;

/// Builds education records from date pairs spanning at least the configured
/// number of months.
///
/// The primary window is classified line by line. The wider window is only
/// searched for a degree abbreviation when the primary one holds none.
pub struct EducationExtractor<'a> {
    ctx: ExtractionContext<'a>,
    degrees: Option<Regex>,
}

impl<'a> EducationExtractor<'a> {
    #[must_use]
    pub fn new(ctx: ExtractionContext<'a>, degrees: &[String]) -> Self {
        let alternatives: Vec<String> = degrees
            .iter()
            .filter(|d| !d.is_empty())
            .map(|d| regex::escape(d))
            .collect();

        let degrees = if alternatives.is_empty() {
            None
        } else {
            match Regex::new(&alternatives.join("|")) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!("Failed to build degree pattern: {}", e);
                    None
                }
            }
        };

        Self { ctx, degrees }
    }

    /// First degree abbreviation occurring in `line`, or empty.
    #[must_use]
    pub fn degree_in(&self, line: &str) -> String {
        self.degrees
            .as_ref()
            .and_then(|pattern| pattern.find(line))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn extract(
        &self,
        lines: &[String],
        segment_text: &str,
        classifier: &dyn Classifier,
    ) -> InferenceResult<EducationData> {
        let config = self.ctx.config;
        let pairs = self.ctx.dates.pairs_for_segment(lines, segment_text);
        let mut education = Vec::new();

        for pair in pairs {
            let months = pair.month_delta();
            if months < config.min_education_months {
                tracing::debug!(
                    line = pair.line(),
                    months,
                    "Skipping education interval shorter than minimum"
                );
                continue;
            }

            let anchor = pair.line();
            let window = window_bounds(anchor, config.education_window_min, lines.len());
            let mut scores = WindowScores::new();
            let mut degree_name = String::new();

            for i in window.clone() {
                if i == anchor {
                    continue;
                }
                let line = &lines[i];
                degree_name = degree_name.max(self.degree_in(line));

                let cleaned = if degree_name.is_empty() {
                    line.clone()
                } else {
                    filter_stopwords(line.replace(degree_name.as_str(), "").trim())
                };
                if cleaned.is_empty() {
                    continue;
                }

                let (label, score) = classify_top(classifier, &cleaned, &config.education_labels)?;
                scores.insert(cleaned, label, score);
            }

            if degree_name.is_empty() {
                for i in window_bounds(anchor, config.education_window_max, lines.len()) {
                    degree_name = degree_name.max(self.degree_in(&lines[i]));
                }
            }

            let window_text = lines[window].join(" ");
            let location = self.ctx.locate(&window_text);

            let record = Education {
                city: location.city,
                school: scores.best_for(&config.school_labels),
                country: location.country,
                end_date: pair.end_date.to_string(),
                start_date: pair.start_date.to_string(),
                degree_name,
                country_code: location.country_code,
                degree_major: scores.best_for(&config.degree_major_labels),
                ..Education::default()
            };

            tracing::debug!(
                line = anchor,
                months,
                school = %record.school,
                degree = %record.degree_name,
                "Education record"
            );
            education.push(record);
        }

        Ok(EducationData { education })
    }
}
