use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::location::City;
use crate::segment::SegmentName;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid CSV resource: {0}")]
    Csv(#[from] csv::Error),
    #[error("Unknown segment name: {0}")]
    UnknownSegment(String),
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
    #[error("Empty resource file: {0}")]
    EmptyResource(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Keyword phrases whose fuzzy match locates the start of one segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderKeywordSet {
    pub name: SegmentName,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl HeaderKeywordSet {
    #[must_use]
    pub fn new(name: SegmentName, keywords: &[&str]) -> Self {
        Self {
            name,
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }
}

/// Header layout used by the segmenter.
///
/// Header order matters: it is the tie-break when two headers resolve to the
/// same offset, and keyword order inside a set is the tie-break between
/// equally similar keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub headers: Vec<HeaderKeywordSet>,
    /// Segments that take the document prefix when no header is found for them.
    pub top_segments: Vec<SegmentName>,
    /// Segments that take the document suffix when no header is found for them.
    pub bottom_segments: Vec<SegmentName>,
    /// Catch-all segment, also the fallback for structured extraction.
    pub default_segment: SegmentName,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            headers: vec![
                HeaderKeywordSet::new(
                    SegmentName::Experience,
                    &[
                        "work history",
                        "work experience",
                        "experience",
                        "professional experience",
                        "related experience",
                        "relevant experience",
                        "programming experience",
                        "freelance",
                        "military experience",
                        "career summary",
                    ],
                ),
                HeaderKeywordSet::new(
                    SegmentName::Education,
                    &[
                        "education",
                        "training",
                        "academic qualifications",
                        "professional training",
                        "course projects",
                        "internships",
                        "apprenticeships",
                        "college activities",
                        "certifications",
                        "special training",
                    ],
                ),
                HeaderKeywordSet::new(
                    SegmentName::Skills,
                    &[
                        "skills",
                        "areas of expertise",
                        "technical skills",
                        "computer skills",
                        "personal skills",
                        "technologies",
                        "languages",
                        "programming languages",
                        "competencies",
                    ],
                ),
                HeaderKeywordSet::new(
                    SegmentName::Objective,
                    &["objective", "summary", "career goals"],
                ),
                HeaderKeywordSet::new(
                    SegmentName::Misc,
                    &[
                        "interests",
                        "activities",
                        "affiliations",
                        "associations",
                        "sports",
                        "memberships",
                        "community involvement",
                        "volunteer work",
                        "additional information",
                    ],
                ),
                HeaderKeywordSet::new(
                    SegmentName::Accomplishments,
                    &[
                        "achievements",
                        "awards",
                        "licenses",
                        "presentations",
                        "dissertations",
                        "publications",
                        "research experience",
                        "grants",
                        "projects",
                        "thesis",
                    ],
                ),
                HeaderKeywordSet::new(SegmentName::Headline, &[]),
            ],
            top_segments: vec![SegmentName::Headline, SegmentName::Objective],
            bottom_segments: vec![SegmentName::Misc, SegmentName::Accomplishments],
            default_segment: SegmentName::Misc,
        }
    }
}

/// Tunables for date pairing, windowed extraction and the secondary parsers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub present_keywords: Vec<String>,

    pub employment_labels: Vec<String>,
    pub location_labels: Vec<String>,
    pub employer_labels: Vec<String>,
    pub job_title_labels: Vec<String>,
    pub experience_window: usize,

    pub education_labels: Vec<String>,
    pub degree_major_labels: Vec<String>,
    pub school_labels: Vec<String>,
    pub education_window_min: usize,
    pub education_window_max: usize,
    pub min_education_months: u32,

    pub person_tag: String,
    pub designation_tag: String,

    pub min_line_length: usize,
    pub min_skill_length: usize,
    pub min_language_length: usize,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            present_keywords: strings(&["present", "now", "actual"]),
            employment_labels: strings(&[
                "institution name",
                "company name",
                "job title",
                "location",
                "other",
            ]),
            location_labels: strings(&["location"]),
            employer_labels: strings(&["institution name", "company name"]),
            job_title_labels: strings(&["job title"]),
            experience_window: 2,
            education_labels: strings(&[
                "university or school name",
                "study place",
                "study topic",
                "other",
            ]),
            degree_major_labels: strings(&["study topic"]),
            school_labels: strings(&["university or school name", "study place"]),
            education_window_min: 3,
            education_window_max: 5,
            min_education_months: 12,
            person_tag: "PERSON".to_string(),
            designation_tag: "Designation".to_string(),
            min_line_length: 2,
            min_skill_length: 2,
            min_language_length: 3,
        }
    }
}

/// Lookup lists loaded once at startup and shared by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resources {
    pub degrees: Vec<String>,
    pub skills: Vec<String>,
    pub cities: Vec<City>,
}

impl Resources {
    pub const DEGREES_FILE: &'static str = "degrees_abbreviations.csv";
    pub const SKILLS_FILE: &'static str = "skills.csv";
    pub const CITIES_FILE: &'static str = "cities.csv";

    /// Loads every resource file found in `dir`. A missing or unreadable file
    /// leaves its list empty.
    #[must_use]
    pub fn load(dir: &Path) -> Self {
        let degrees = load_or_warn(&dir.join(Self::DEGREES_FILE), read_header_list);
        let skills = load_or_warn(&dir.join(Self::SKILLS_FILE), read_header_list);
        let cities = load_or_warn(&dir.join(Self::CITIES_FILE), read_city_list);

        tracing::info!(
            degrees = degrees.len(),
            skills = skills.len(),
            cities = cities.len(),
            "Loaded resources from {}",
            dir.display()
        );

        Self {
            degrees,
            skills,
            cities,
        }
    }
}

fn load_or_warn<T>(path: &Path, reader: fn(&Path) -> ConfigResult<Vec<T>>) -> Vec<T> {
    match reader(path) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!("Failed to load file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Reads a list stored as the header row of a CSV file.
pub fn read_header_list(path: &Path) -> ConfigResult<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let list: Vec<String> = reader
        .headers()?
        .iter()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();

    if list.is_empty() {
        return Err(ConfigError::EmptyResource(path.to_path_buf()));
    }
    Ok(list)
}

/// Reads `city,country` rows. Rows missing either column are skipped.
pub fn read_city_list(path: &Path) -> ConfigResult<Vec<City>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut cities = Vec::new();
    for record in reader.records() {
        let record = record?;
        match (record.get(0), record.get(1)) {
            (Some(city), Some(country)) if !city.is_empty() && !country.is_empty() => {
                cities.push(City::new(city, country));
            }
            _ => tracing::debug!("Skipping city row {:?}", record),
        }
    }
    Ok(cities)
}

/// On-disk settings file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub headers: HeaderConfig,
    pub parser: ParserConfig,
    pub resources_dir: Option<PathBuf>,
    pub classifier_url: Option<String>,
    pub tagger_url: Option<String>,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            headers: HeaderConfig::default(),
            parser: ParserConfig::default(),
            resources_dir: None,
            classifier_url: None,
            tagger_url: None,
            port: 8000,
        }
    }
}

impl Settings {
    pub const FILE_NAME: &'static str = "config.json";

    /// Loads settings from `path`, or from the user config directory when no
    /// path is given, falling back to defaults when that file does not exist.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&content)?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("cvsift").join(Self::FILE_NAME))
    }

    #[must_use]
    pub fn resources(&self) -> Resources {
        self.resources_dir
            .as_deref()
            .map(Resources::load)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_headers_cover_every_segment() {
        let config = HeaderConfig::default();
        assert_eq!(config.headers.len(), 7);
        assert_eq!(config.default_segment, SegmentName::Misc);
        assert!(config
            .headers
            .iter()
            .any(|h| h.name == SegmentName::Headline && h.keywords.is_empty()));
    }

    #[test]
    fn test_read_header_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "BSc,MSc,\"PhD\", MBA").unwrap();
        writeln!(file, "ignored,row").unwrap();

        let list = read_header_list(file.path()).unwrap();
        assert_eq!(list, vec!["BSc", "MSc", "PhD", "MBA"]);
    }

    #[test]
    fn test_read_header_list_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            read_header_list(file.path()),
            Err(ConfigError::EmptyResource(_))
        ));
    }

    #[test]
    fn test_read_city_list_skips_malformed_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Lyon,France").unwrap();
        writeln!(file, "no-country").unwrap();
        writeln!(file, "Porto, Portugal").unwrap();

        let cities = read_city_list(file.path()).unwrap();
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[1], City::new("Porto", "Portugal"));
    }

    #[test]
    fn test_read_header_list_quoted_comma() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\"B.Sc., Hons\",MSc").unwrap();

        let list = read_header_list(file.path()).unwrap();
        assert_eq!(list, vec!["B.Sc., Hons", "MSc"]);
    }

    #[test]
    fn test_read_city_list_quoted_comma() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\"Washington, D.C.\",United States").unwrap();

        let cities = read_city_list(file.path()).unwrap();
        assert_eq!(cities, vec![City::new("Washington, D.C.", "United States")]);
    }

    #[test]
    fn test_resources_missing_dir_yields_empty_lists() {
        let dir = tempfile::tempdir().unwrap();
        let resources = Resources::load(&dir.path().join("absent"));
        assert_eq!(resources, Resources::default());
    }

    #[test]
    fn test_settings_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"parser": {{"experience_window": 4}}, "classifier_url": "http://localhost:9000"}}"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.parser.experience_window, 4);
        assert_eq!(settings.parser.min_education_months, 12);
        assert_eq!(settings.classifier_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(settings.headers, HeaderConfig::default());
    }

    #[test]
    fn test_settings_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            Settings::load(Some(file.path())),
            Err(ConfigError::Parse(_))
        ));
    }
}
