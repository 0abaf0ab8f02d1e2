use super::{window_bounds, ExtractionContext, WindowScores};
use crate::inference::{classify_top, Classifier, InferenceResult};
use crate::response::{Experience, ExperienceData};

/// Builds one experience record per date pair of a segment from the top
/// classifier labels of the lines around the pair.
pub struct ExperienceExtractor<'a> {
    ctx: ExtractionContext<'a>,
}

impl<'a> ExperienceExtractor<'a> {
    #[must_use]
    pub fn new(ctx: ExtractionContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn extract(
        &self,
        lines: &[String],
        segment_text: &str,
        classifier: &dyn Classifier,
    ) -> InferenceResult<ExperienceData> {
        let config = self.ctx.config;
        let pairs = self.ctx.dates.pairs_for_segment(lines, segment_text);
        let mut experience = Vec::with_capacity(pairs.len());

        for pair in pairs {
            let anchor = pair.line();
            let mut scores = WindowScores::new();

            for i in window_bounds(anchor, config.experience_window, lines.len()) {
                if i == anchor {
                    continue;
                }
                let line = &lines[i];
                let (label, score) = classify_top(classifier, line, &config.employment_labels)?;
                scores.insert(line.as_str(), label, score);
            }

            let location = self.ctx.locate(&scores.best_for(&config.location_labels));
            let record = Experience {
                city: location.city,
                title: scores.best_for(&config.job_title_labels),
                country: location.country,
                employer: scores.best_for(&config.employer_labels),
                end_date: pair.end_date.to_string(),
                start_date: pair.start_date.to_string(),
                country_code: location.country_code,
                ..Experience::default()
            };

            tracing::debug!(
                line = anchor,
                start = %pair.start_date,
                end = %pair.end_date,
                employer = %record.employer,
                title = %record.title,
                "Experience record"
            );
            experience.push(record);
        }

        Ok(ExperienceData { experience })
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{dates, lines};
    use super::*;
    use crate::config::ParserConfig;
    use crate::inference::testing::{FailingClassifier, ScriptedClassifier};
    use crate::location::{CountryTable, GazetteerResolver};

    fn scripted() -> ScriptedClassifier {
        ScriptedClassifier::new(&[
            ("Acme Corp", "company name", 0.91),
            ("Paris, France", "location", 0.88),
            ("Senior Engineer", "job title", 0.95),
            ("Built data pipelines", "other", 0.6),
        ])
    }

    #[test]
    fn test_window_roles() {
        let config = ParserConfig::default();
        let dates = dates(&config);
        let resolver = GazetteerResolver::default();
        let ctx = ExtractionContext::new(&config, &dates, &resolver, &CountryTable);

        let doc = lines(&[
            "Work Experience",
            "Acme Corp",
            "03/2018 - 06/2021",
            "Senior Engineer",
            "Paris, France",
            "Built data pipelines",
        ]);
        let segment = doc.join(" ");
        let classifier = scripted();

        let data = ExperienceExtractor::new(ctx)
            .extract(&doc, &segment, &classifier)
            .unwrap();

        assert_eq!(
            data.experience,
            vec![Experience {
                city: "Paris".into(),
                title: "Senior Engineer".into(),
                country: "France".into(),
                employer: "Acme Corp".into(),
                end_date: "06/2021".into(),
                start_date: "03/2018".into(),
                country_code: "FR".into(),
                ..Experience::default()
            }]
        );
        // Lines 0..=4 minus the anchor.
        assert_eq!(classifier.calls(), 4);
    }

    #[test]
    fn test_window_clamped_at_document_end() {
        let config = ParserConfig::default();
        let dates = dates(&config);
        let resolver = GazetteerResolver::default();
        let ctx = ExtractionContext::new(&config, &dates, &resolver, &CountryTable);

        let doc = lines(&["Acme Corp", "Senior Engineer", "Jan 2019 - present"]);
        let classifier = scripted();

        let data = ExperienceExtractor::new(ctx)
            .extract(&doc, &doc.join(" "), &classifier)
            .unwrap();

        assert_eq!(data.experience.len(), 1);
        let record = &data.experience[0];
        assert_eq!(record.employer, "Acme Corp");
        assert_eq!(record.title, "Senior Engineer");
        assert_eq!(record.start_date, "01/2019");
        assert_eq!(record.end_date, "10/2026");
        assert_eq!(record.city, "");
        assert_eq!(record.country_code, "");
    }

    #[test]
    fn test_one_date_yields_no_records() {
        let config = ParserConfig::default();
        let dates = dates(&config);
        let resolver = GazetteerResolver::default();
        let ctx = ExtractionContext::new(&config, &dates, &resolver, &CountryTable);

        let doc = lines(&["Joined Acme Corp in 2019"]);
        let classifier = scripted();

        let data = ExperienceExtractor::new(ctx)
            .extract(&doc, &doc[0], &classifier)
            .unwrap();
        assert!(data.experience.is_empty());
        assert_eq!(classifier.calls(), 0);
    }

    #[test]
    fn test_classifier_failure_propagates() {
        let config = ParserConfig::default();
        let dates = dates(&config);
        let resolver = GazetteerResolver::default();
        let ctx = ExtractionContext::new(&config, &dates, &resolver, &CountryTable);

        let doc = lines(&["Acme Corp", "2015 - 2019"]);
        let result = ExperienceExtractor::new(ctx).extract(&doc, &doc.join(" "), &FailingClassifier);
        assert!(result.is_err());
    }
}
