//! JSON shape of a parsed resume.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const REMARK_COMPLETE: &str = "Parsing Complete";
pub const REMARK_INCOMPLETE: &str = "Parsing Uncomplete";
pub const STATUS_SUCCESS: &str = "succeeded";
pub const STATUS_FAILURE: &str = "unsucceeded";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub city: String,
    pub title: String,
    pub country: String,
    pub employer: String,
    pub end_date: String,
    pub start_date: String,
    pub description: String,
    pub country_code: String,
    pub custom_sections: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceData {
    pub experience: Vec<Experience>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub city: String,
    pub school: String,
    pub country: String,
    pub end_date: String,
    pub start_date: String,
    pub degree_name: String,
    pub description: String,
    pub country_code: String,
    pub degree_major: String,
    pub custom_sections: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationData {
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsData {
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDetail {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl ContactDetail {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: None,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactData {
    pub email: Vec<ContactDetail>,
    pub phone: Vec<ContactDetail>,
    pub address: Vec<String>,
    pub website: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryData {
    pub benefits: String,
    pub objective: String,
    pub description: String,
    pub notice_period: String,
    pub current_salary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalData {
    pub gender: String,
    pub full_name: String,
    pub birthplace: String,
    pub first_name: String,
    pub family_name: String,
    pub middle_name: String,
    pub nationality: Vec<String>,
    pub picture_url: String,
    pub date_of_birth: String,
    pub marital_status: String,
    pub picture_extension: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub code: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguagesData {
    pub languages: Vec<Language>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementsData {
    pub achievements: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaData {
    pub job_pk: u32,
    pub remark: String,
    pub status: String,
    pub resume_pk: u32,
    pub candidate_pk: u32,
    pub language_code: String,
    pub language_confidence: f64,
}

impl Default for MetaData {
    fn default() -> Self {
        Self {
            job_pk: 0,
            remark: String::new(),
            status: STATUS_FAILURE.to_string(),
            resume_pk: 0,
            candidate_pk: 0,
            language_code: String::new(),
            language_confidence: 0.0,
        }
    }
}

impl MetaData {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeParsingResponse {
    pub skills: SkillsData,
    pub contact: ContactData,
    pub summary: SummaryData,
    pub metadata: MetaData,
    pub personal: PersonalData,
    pub education: EducationData,
    pub experience: ExperienceData,
    pub languages: LanguagesData,
    pub achievements: AchievementsData,
    pub certifications: AchievementsData,
    pub qualifications: AchievementsData,
}

impl ResumeParsingResponse {
    /// Response carrying nothing but metadata, returned when parsing fails.
    #[must_use]
    pub fn failed(metadata: MetaData) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }
}
