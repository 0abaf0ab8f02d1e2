//! Structured records built from date pairs and the lines around them.

mod education;
mod experience;
mod fallback;
mod window;

use crate::config::ParserConfig;
use crate::dates::DateExtractor;
use crate::location::{resolve_location, CountryCodeLookup, LocationResolver, ResolvedLocation};

pub use education::EducationExtractor;
pub use experience::ExperienceExtractor;
pub use fallback::{run_with_fallback, RecordCollection};
pub use window::{window_bounds, WindowScores};

/// Shared, read-only collaborators of the record extractors.
#[derive(Clone, Copy)]
pub struct ExtractionContext<'a> {
    pub config: &'a ParserConfig,
    pub dates: &'a DateExtractor,
    pub locations: &'a dyn LocationResolver,
    pub country_codes: &'a dyn CountryCodeLookup,
}

impl<'a> ExtractionContext<'a> {
    #[must_use]
    pub fn new(
        config: &'a ParserConfig,
        dates: &'a DateExtractor,
        locations: &'a dyn LocationResolver,
        country_codes: &'a dyn CountryCodeLookup,
    ) -> Self {
        Self {
            config,
            dates,
            locations,
            country_codes,
        }
    }

    fn locate(&self, text: &str) -> ResolvedLocation {
        resolve_location(self.locations, self.country_codes, text)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use chrono::NaiveDate;

    use crate::config::ParserConfig;
    use crate::dates::DateExtractor;

    pub fn dates(config: &ParserConfig) -> DateExtractor {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap_or_default();
        DateExtractor::new(&config.present_keywords, today)
    }

    pub fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| (*l).to_string()).collect()
    }
}
