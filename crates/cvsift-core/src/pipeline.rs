use chrono::{Local, NaiveDate};
use std::path::Path;

use crate::config::{HeaderConfig, ParserConfig, Resources};
use crate::dates::DateExtractor;
use crate::extract::{run_with_fallback, EducationExtractor, ExperienceExtractor, ExtractionContext};
use crate::fields::{
    generate_metadata, parse_contact, parse_headline, parse_languages, parse_personal,
    parse_skills, ParseStatus,
};
use crate::inference::{Classifier, EntityTagger, InferenceResult};
use crate::location::{CountryCodeLookup, CountryTable, GazetteerResolver, LocationResolver};
use crate::reader::{document_lines, read_document};
use crate::response::ResumeParsingResponse;
use crate::segment::{SegmentName, Segmenter, Segments};

/// End-to-end resume parser: segmentation, field parsers and the dated
/// record extractors, wired to the injected inference collaborators.
pub struct ResumeParser {
    headers: HeaderConfig,
    config: ParserConfig,
    resources: Resources,
    classifier: Box<dyn Classifier>,
    tagger: Box<dyn EntityTagger>,
    locations: Box<dyn LocationResolver>,
    country_codes: Box<dyn CountryCodeLookup>,
    today: Option<NaiveDate>,
}

impl ResumeParser {
    #[must_use]
    pub fn new(classifier: Box<dyn Classifier>, tagger: Box<dyn EntityTagger>) -> Self {
        Self {
            headers: HeaderConfig::default(),
            config: ParserConfig::default(),
            resources: Resources::default(),
            classifier,
            tagger,
            locations: Box::new(GazetteerResolver::default()),
            country_codes: Box::new(CountryTable),
            today: None,
        }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HeaderConfig) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the degree, skill and city lists. Cities extend the default
    /// gazetteer.
    #[must_use]
    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.locations = Box::new(GazetteerResolver::new(&resources.cities));
        self.resources = resources;
        self
    }

    #[must_use]
    pub fn with_location_resolver(mut self, resolver: Box<dyn LocationResolver>) -> Self {
        self.locations = resolver;
        self
    }

    #[must_use]
    pub fn with_country_codes(mut self, lookup: Box<dyn CountryCodeLookup>) -> Self {
        self.country_codes = lookup;
        self
    }

    /// Fixes the date that "present" resolves to; the local date otherwise.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderConfig {
        &self.headers
    }

    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    #[must_use]
    pub fn date_extractor(&self) -> DateExtractor {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        DateExtractor::new(&self.config.present_keywords, today)
    }

    #[must_use]
    pub fn lines(&self, text: &str) -> Vec<String> {
        document_lines(text, self.config.min_line_length)
    }

    #[must_use]
    pub fn segment(&self, text: &str) -> Segments {
        Segmenter::new(&self.headers).segment(text)
    }

    /// Parses a resume file. Only reading the file can fail; parsing errors
    /// are reported in the response metadata.
    pub fn parse_file(&self, path: &Path) -> crate::Result<ResumeParsingResponse> {
        let text = read_document(path)?;
        Ok(self.parse_text(&text))
    }

    #[must_use]
    pub fn parse_text(&self, text: &str) -> ResumeParsingResponse {
        self.parse_lines(&self.lines(text))
    }

    /// Parses normalized resume lines. A collaborator failure yields a
    /// response holding only failure metadata.
    #[must_use]
    pub fn parse_lines(&self, lines: &[String]) -> ResumeParsingResponse {
        match self.try_parse(lines) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Resume parsing failed: {}", e);
                ResumeParsingResponse::failed(generate_metadata(ParseStatus::Incomplete, ""))
            }
        }
    }

    pub fn try_parse(&self, lines: &[String]) -> InferenceResult<ResumeParsingResponse> {
        let config = &self.config;
        let full_text = lines.join(" ");
        let segments = self.segment(&full_text);
        let headline_text = segments.get(SegmentName::Headline);
        let fallback_text = segments.get(self.headers.default_segment);

        let skills = parse_skills(
            segments.get(SegmentName::Skills),
            &self.resources.skills,
            config.min_skill_length,
        );
        let contact = parse_contact(headline_text);
        let headline = parse_headline(headline_text, self.tagger.as_ref(), config)?;
        let personal = parse_personal(&headline.full_name);
        let languages = parse_languages(&full_text, config.min_language_length);

        let dates = self.date_extractor();
        let ctx = ExtractionContext::new(
            config,
            &dates,
            self.locations.as_ref(),
            self.country_codes.as_ref(),
        );

        let education_extractor = EducationExtractor::new(ctx, &self.resources.degrees);
        let education = run_with_fallback(
            |l: &[String], s: &str, c: &dyn Classifier| education_extractor.extract(l, s, c),
            lines,
            segments.get(SegmentName::Education),
            fallback_text,
            self.classifier.as_ref(),
        )?;

        let experience_extractor = ExperienceExtractor::new(ctx);
        let experience = run_with_fallback(
            |l: &[String], s: &str, c: &dyn Classifier| experience_extractor.extract(l, s, c),
            lines,
            segments.get(SegmentName::Experience),
            fallback_text,
            self.classifier.as_ref(),
        )?;

        tracing::info!(
            lines = lines.len(),
            skills = skills.skills.len(),
            education = education.education.len(),
            experience = experience.experience.len(),
            "Parsed resume"
        );

        Ok(ResumeParsingResponse {
            skills,
            contact,
            summary: headline.summary,
            metadata: generate_metadata(ParseStatus::Complete, &full_text),
            personal,
            education,
            experience,
            languages,
            ..ResumeParsingResponse::default()
        })
    }
}
