use crate::inference::{Classifier, InferenceResult};
use crate::response::{EducationData, ExperienceData};

/// Output of a structured extractor: a possibly empty list of records.
pub trait RecordCollection {
    fn is_empty(&self) -> bool;
}

impl RecordCollection for ExperienceData {
    fn is_empty(&self) -> bool {
        self.experience.is_empty()
    }
}

impl RecordCollection for EducationData {
    fn is_empty(&self) -> bool {
        self.education.is_empty()
    }
}

impl<T> RecordCollection for Vec<T> {
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

/// Runs `extract` against the primary segment text and, only when that yields
/// no record, against the fallback text. Results are never merged.
pub fn run_with_fallback<T, F>(
    extract: F,
    lines: &[String],
    primary: &str,
    fallback: &str,
    classifier: &dyn Classifier,
) -> InferenceResult<T>
where
    T: RecordCollection,
    F: Fn(&[String], &str, &dyn Classifier) -> InferenceResult<T>,
{
    let result = extract(lines, primary, classifier)?;
    if !result.is_empty() {
        return Ok(result);
    }

    tracing::debug!("Primary segment yielded no records; trying fallback segment");
    extract(lines, fallback, classifier)
}
